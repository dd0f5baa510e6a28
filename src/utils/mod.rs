//! 通用工具函数模块
//!
//! 提供相似度计算和异步批处理等常用函数，避免代码重复。

pub mod async_utils;
pub mod similarity;

pub use async_utils::*;
pub use similarity::*;
