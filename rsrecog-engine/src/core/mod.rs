mod example;
mod fingerprint;
mod interpolate;
mod matchers;
mod pattern;
mod verify;

// 导出常用项
pub use example::{FingerprintExample, ENCODING_KEY, FILENAME_KEY};
pub use fingerprint::Fingerprint;
pub use interpolate::{interpolate, ParamMap, CPE_SUFFIX};
pub use matchers::{Matchers, RecogMatch};
pub use pattern::{PatternFlags, PatternMatch, RecogPattern, RegexRecogPattern};
pub use verify::VerifyStatus;
