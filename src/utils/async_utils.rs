//! 异步操作工具
//!
//! 提供有界并发的批量处理函数。

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

/// 以有界并发处理数据，结果顺序与输入一致
///
/// 同时最多运行 `concurrency` 个 Future；任一 Future 失败时立即返回该错误。
///
/// # 示例
/// ```rust,no_run
/// use langchain_compressors::utils::buffered_try_map;
///
/// # async fn example() {
/// let results = buffered_try_map(vec![1, 2, 3], 2, |item| async move {
///     Ok::<i32, String>(item * 2)
/// })
/// .await
/// .unwrap();
/// assert_eq!(results, vec![2, 4, 6]);
/// # }
/// ```
pub async fn buffered_try_map<T, R, E, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    processor: F,
) -> Result<Vec<R>, E>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    stream::iter(items.into_iter().map(processor))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
