//! rsrecog-verify - 指纹目录自检CLI
//! 逐个目录文件运行内嵌示例校验，退出码为失败数+告警数
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use walkdir::WalkDir;

use rsrecog::{CatalogLoader, Verifier, VerifierOptions};

#[derive(Parser, Debug)]
#[command(
    name = "rsrecog-verify",
    about = "Verifies that each fingerprint passes its internal tests.",
    version
)]
struct Cli {
    /// 指纹目录文件或目录树
    #[arg(required = true, value_name = "FINGERPRINT_FILE")]
    paths: Vec<PathBuf>,

    /// 输出格式：[s]ummary / [q]uiet / [d]etail
    #[arg(short, long, value_name = "FORMATTER", default_value = "s")]
    format: String,

    /// 启用ANSI着色输出
    #[arg(short, long)]
    color: bool,

    /// 统计并输出告警（默认开启）
    #[arg(long, overrides_with = "no_warnings")]
    warnings: bool,

    /// 不统计告警
    #[arg(long, overrides_with = "warnings")]
    no_warnings: bool,
}

impl Cli {
    fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            color: self.color,
            detail: self.format.starts_with('d'),
            quiet: self.format.starts_with('q'),
            warnings: self.warnings || !self.no_warnings,
        }
    }
}

/// 展开命令行路径：目录递归收集*.json，普通文件原样保留
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().flatten() {
                let entry_path = entry.path();
                if entry.file_type().is_file()
                    && entry_path.extension().map(|ext| ext == "json").unwrap_or(false)
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.verifier_options();

    let mut failures = 0usize;
    let mut warnings = 0usize;

    for file in collect_files(&cli.paths) {
        // 校验场景始终用严格模式加载，目录本身的问题直接致命
        let matchers = CatalogLoader::new()
            .strict(true)
            .load_file(&file)
            .with_context(|| format!("parsing fingerprints file '{}'", file.display()))?;

        let mut verifier = Verifier::create_with_path(
            options.clone(),
            matchers,
            file.display().to_string(),
            Box::new(io::stdout()),
        );
        verifier.verify();

        failures += verifier.reporter().failure_count();
        warnings += verifier.reporter().warning_count();
    }

    // 退出码承载问题总数，封顶到u8范围
    Ok(ExitCode::from((failures + warnings).min(255) as u8))
}
