use std::io::Write;

/// ANSI转义色码
#[derive(Debug, Clone, Copy)]
enum Color {
    Reset = 0,
    Red = 31,
    Yellow = 33,
    Green = 32,
    White = 15,
}

/// 分级着色输出器，写入注入的输出流
pub struct Formatter {
    color: bool,
    writer: Box<dyn Write + Send>,
}

impl Formatter {
    pub fn new(color: bool, writer: Box<dyn Write + Send>) -> Self {
        Formatter { color, writer }
    }

    pub fn status_message(&mut self, text: &str) {
        self.writeln(text, Color::White);
    }

    pub fn success_message(&mut self, text: &str) {
        self.writeln(text, Color::Green);
    }

    pub fn warning_message(&mut self, text: &str) {
        self.writeln(text, Color::Yellow);
    }

    pub fn failure_message(&mut self, text: &str) {
        self.writeln(text, Color::Red);
    }

    fn writeln(&mut self, text: &str, color: Color) {
        // 输出流写失败不中断校验流程
        let _ = if self.color {
            writeln!(
                self.writer,
                "\u{1b}[{}m{}\u{1b}[{}m",
                color as u8, text, Color::Reset as u8
            )
        } else {
            writeln!(self.writer, "{}", text)
        };
    }
}
