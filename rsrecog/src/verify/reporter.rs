use rsrecog_engine::Fingerprint;

use super::formatter::Formatter;
use super::options::VerifierOptions;

/// 校验上报器：计数+按选项分级输出
/// 汇总行按最差状态着色（有失败按失败色，仅告警按告警色，否则成功色）
pub struct VerifyReporter {
    options: VerifierOptions,
    formatter: Formatter,
    path: Option<String>,
    success_count: usize,
    warning_count: usize,
    failure_count: usize,
}

impl VerifyReporter {
    pub fn new(options: VerifierOptions, formatter: Formatter) -> Self {
        Self::with_path(options, formatter, None)
    }

    pub fn with_path(
        options: VerifierOptions,
        formatter: Formatter,
        path: Option<String>,
    ) -> Self {
        VerifyReporter {
            options,
            formatter,
            path,
            success_count: 0,
            warning_count: 0,
            failure_count: 0,
        }
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    pub fn report(&mut self, fingerprint_count: usize) {
        if !self.options.quiet {
            self.summarize(fingerprint_count);
        }
    }

    pub fn success(&mut self, text: &str) {
        self.success_count += 1;
        if self.options.detail {
            let message = format!("{}{}", self.padding(), text);
            self.formatter.success_message(&message);
        }
    }

    pub fn warning(&mut self, text: &str) {
        if !self.options.warnings {
            return;
        }

        self.warning_count += 1;
        let message = format!("{}{}WARN: {}", self.path_label(), self.padding(), text);
        self.formatter.warning_message(&message);
    }

    pub fn failure(&mut self, text: &str) {
        self.failure_count += 1;
        let message = format!("{}{}FAIL: {}", self.path_label(), self.padding(), text);
        self.formatter.failure_message(&message);
    }

    /// 详细模式下输出当前目录文件路径
    pub fn print_path(&mut self) {
        if self.options.detail {
            if let Some(path) = self.path.clone().filter(|path| !path.is_empty()) {
                self.formatter.status_message(&format!("\n{}:", path));
            }
        }
    }

    /// 详细模式下输出带示例的指纹名
    pub fn print_name(&mut self, fingerprint: &Fingerprint) {
        if self.options.detail && !fingerprint.examples().is_empty() {
            let name = match fingerprint.description() {
                Some(description) if !description.is_empty() => description,
                _ => "[unnamed]",
            };
            self.formatter.status_message(&format!("\n{}", name));
        }
    }

    pub fn summarize(&mut self, fingerprint_count: usize) {
        if self.options.detail {
            self.print_fingerprint_count(fingerprint_count);
        }
        self.print_summary();
    }

    fn print_fingerprint_count(&mut self, count: usize) {
        self.formatter
            .status_message(&format!("\nVerified {} fingerprints:", count));
    }

    fn print_summary(&mut self) {
        let summary = format!(
            "{}SUMMARY: Test completed with {} successful, {} warnings, and {} failures",
            self.path_label(),
            self.success_count,
            self.warning_count,
            self.failure_count
        );

        if self.failure_count > 0 {
            self.formatter.failure_message(&summary);
        } else if self.warning_count > 0 {
            self.formatter.warning_message(&summary);
        } else {
            self.formatter.success_message(&summary);
        }
    }

    fn path_label(&self) -> String {
        match &self.path {
            Some(path) if !self.options.detail && !path.is_empty() => format!("{}: ", path),
            _ => String::new(),
        }
    }

    fn padding(&self) -> &'static str {
        if self.options.detail {
            "   "
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::test_support::SharedBuf;

    fn reporter(options: VerifierOptions, buf: &SharedBuf) -> VerifyReporter {
        VerifyReporter::new(options, Formatter::new(false, Box::new(buf.clone())))
    }

    #[test]
    fn test_counts_accumulate() {
        let buf = SharedBuf::default();
        let mut reporter = reporter(VerifierOptions::default(), &buf);
        reporter.success("ok");
        reporter.success("ok");
        reporter.warning("minor");
        reporter.failure("broken");

        assert_eq!(reporter.success_count(), 2);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.failure_count(), 1);
    }

    #[test]
    fn test_warnings_disabled_not_counted() {
        // 测试场景：关闭告警跟踪后告警不计数也不输出
        let buf = SharedBuf::default();
        let options = VerifierOptions {
            warnings: false,
            ..VerifierOptions::default()
        };
        let mut reporter = reporter(options, &buf);
        reporter.warning("minor");

        assert_eq!(reporter.warning_count(), 0);
        assert!(!buf.contents().contains("WARN"));
    }

    #[test]
    fn test_success_silent_without_detail() {
        let buf = SharedBuf::default();
        let mut reporter = reporter(VerifierOptions::default(), &buf);
        reporter.success("ok");
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn test_quiet_mode_suppresses_summary() {
        let buf = SharedBuf::default();
        let options = VerifierOptions {
            quiet: true,
            ..VerifierOptions::default()
        };
        let mut reporter = reporter(options, &buf);
        reporter.report(3);
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn test_summary_line() {
        let buf = SharedBuf::default();
        let mut reporter = reporter(VerifierOptions::default(), &buf);
        reporter.success("ok");
        reporter.failure("broken");
        reporter.report(2);

        let output = buf.contents();
        assert!(output.contains(
            "SUMMARY: Test completed with 1 successful, 0 warnings, and 1 failures"
        ));
    }

    #[test]
    fn test_path_label_prefixes_failures() {
        let buf = SharedBuf::default();
        let mut reporter = VerifyReporter::with_path(
            VerifierOptions::default(),
            Formatter::new(false, Box::new(buf.clone())),
            Some("catalog/apache.json".to_string()),
        );
        reporter.failure("broken");

        assert!(buf.contents().starts_with("catalog/apache.json: FAIL: broken"));
    }
}
