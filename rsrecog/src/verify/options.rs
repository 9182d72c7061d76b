/// 校验输出选项
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// ANSI着色输出
    pub color: bool,
    /// 详细模式：逐条指纹/逐条示例输出
    pub detail: bool,
    /// 安静模式：仅输出失败与告警
    pub quiet: bool,
    /// 是否统计并输出告警
    pub warnings: bool,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        VerifierOptions {
            color: false,
            detail: false,
            quiet: false,
            warnings: true,
        }
    }
}
