//! 核心数据模型。

pub mod form;
pub mod song;
