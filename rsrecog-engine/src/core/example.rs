use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 保留属性键：标记示例文本为base64编码
pub const ENCODING_KEY: &str = "_encoding";
/// 保留属性键：示例文本存放在外部文件
pub const FILENAME_KEY: &str = "_filename";

/// 预编译空白正则，base64解码前统一剥离空白字符
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 指纹示例：样本文本+期望参数属性表
/// base64解码与外部文件读取在构造期一次性完成，之后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintExample {
    text: String,
    attributes: FxHashMap<String, String>,
}

impl FingerprintExample {
    /// 构造示例
    /// - 属性含`_filename`时，从`example_dir`下的同名文件读取样本文本
    /// - 属性含`_encoding: base64`时，剥离空白后解码样本文本
    pub fn new(
        text: impl Into<String>,
        attributes: FxHashMap<String, String>,
        example_dir: Option<&Path>,
    ) -> CoreResult<Self> {
        let raw = match attributes.get(FILENAME_KEY) {
            Some(filename) => {
                let path = match example_dir {
                    Some(dir) => dir.join(filename),
                    None => Path::new(filename).to_path_buf(),
                };
                let bytes = fs::read(&path).map_err(|source| CoreError::ExampleFileError {
                    path: path.clone(),
                    source,
                })?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            None => text.into(),
        };

        let text = if attributes.get(ENCODING_KEY).map(String::as_str) == Some("base64") {
            let stripped = WHITESPACE.replace_all(&raw, "");
            let decoded = STANDARD.decode(stripped.as_bytes())?;
            String::from_utf8_lossy(&decoded).into_owned()
        } else {
            raw
        };

        Ok(FingerprintExample { text, attributes })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> &FxHashMap<String, String> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> FxHashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_example_keeps_text() {
        let example =
            FingerprintExample::new("Apache HTTPD 6.5", attrs(&[("service.version", "6.5")]), None)
                .unwrap();
        assert_eq!(example.text(), "Apache HTTPD 6.5");
        assert_eq!(
            example.attributes().get("service.version").map(String::as_str),
            Some("6.5")
        );
    }

    #[test]
    fn test_base64_example_decoded_at_construction() {
        // "Apache HTTPD 6.5" 的base64编码
        let example = FingerprintExample::new(
            "QXBhY2hlIEhUVFBEIDYuNQ==",
            attrs(&[("_encoding", "base64")]),
            None,
        )
        .unwrap();
        assert_eq!(example.text(), "Apache HTTPD 6.5");
    }

    #[test]
    fn test_base64_whitespace_stripped_before_decode() {
        // 测试场景：编码文本带换行与空格，解码前剥离
        let example = FingerprintExample::new(
            "QXBhY2hl\n IEhUVFBE\t IDYuNQ==",
            attrs(&[("_encoding", "base64")]),
            None,
        )
        .unwrap();
        assert_eq!(example.text(), "Apache HTTPD 6.5");
    }

    #[test]
    fn test_invalid_base64_is_error() {
        let result = FingerprintExample::new(
            "!!! not base64 !!!",
            attrs(&[("_encoding", "base64")]),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_external_file_example() {
        let dir = std::env::temp_dir().join("rsrecog_example_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("banner.txt"), "SSH-2.0-OpenSSH_8.9").unwrap();

        let example = FingerprintExample::new(
            "",
            attrs(&[("_filename", "banner.txt")]),
            Some(dir.as_path()),
        )
        .unwrap();
        assert_eq!(example.text(), "SSH-2.0-OpenSSH_8.9");
    }

    #[test]
    fn test_missing_external_file_is_error() {
        let result = FingerprintExample::new(
            "",
            attrs(&[("_filename", "no_such_file.txt")]),
            Some(Path::new("/nonexistent")),
        );
        assert!(matches!(result, Err(CoreError::ExampleFileError { .. })));
    }
}
