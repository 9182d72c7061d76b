use std::io::Write;

use rsrecog_engine::{Matchers, VerifyStatus};

use super::formatter::Formatter;
use super::options::VerifierOptions;
use super::reporter::VerifyReporter;

/// 目录校验器：逐条指纹执行示例自检并上报
pub struct Verifier {
    matchers: Matchers,
    reporter: VerifyReporter,
}

impl Verifier {
    /// 组装输出链（Formatter → Reporter）后构造
    pub fn create(
        options: VerifierOptions,
        matchers: Matchers,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let formatter = Formatter::new(options.color, output);
        let reporter = VerifyReporter::new(options, formatter);
        Verifier::new(matchers, reporter)
    }

    /// 带路径标签的构造，失败/告警行会带上目录文件路径前缀
    pub fn create_with_path(
        options: VerifierOptions,
        matchers: Matchers,
        path: impl Into<String>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let formatter = Formatter::new(options.color, output);
        let reporter = VerifyReporter::with_path(options, formatter, Some(path.into()));
        Verifier::new(matchers, reporter)
    }

    pub fn new(matchers: Matchers, reporter: VerifyReporter) -> Self {
        Verifier { matchers, reporter }
    }

    pub fn matchers(&self) -> &Matchers {
        &self.matchers
    }

    pub fn reporter(&self) -> &VerifyReporter {
        &self.reporter
    }

    /// 执行校验：示例匹配+期望属性断言+捕获组覆盖率
    /// 目录中参数合法性已由加载器保证，这里只消费分级结果
    pub fn verify(&mut self) {
        let reporter = &mut self.reporter;
        reporter.print_path();

        for fingerprint in &self.matchers {
            reporter.print_name(fingerprint);

            fingerprint.verify_examples(|status, message| match status {
                VerifyStatus::Warn => reporter.warning(&message),
                VerifyStatus::Fail => reporter.failure(&message),
                VerifyStatus::Success => reporter.success(&message),
            });
        }

        reporter.report(self.matchers.len());
    }
}
