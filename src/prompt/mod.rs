//! 提示词构建模块。
//!
//! [`assembler`] 负责把表单字段、翻译后的风格串与规则片段
//! 确定性地拼装成一条主提示词；[`concepts`] 提供修订、封面、
//! MV 等辅助提示词的构建函数。所有函数都是纯字符串操作。

pub mod assembler;
pub mod concepts;
pub(crate) mod texts;

pub use assembler::assemble;
