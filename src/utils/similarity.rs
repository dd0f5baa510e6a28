//! 相似度计算工具函数
//!
//! 提供余弦相似度、批量计算以及 top-k 选择。

use std::cmp::Ordering;

/// 计算两个向量的余弦相似度 (f64 精度)
///
/// 长度不一致或任一向量为零向量时返回 `0.0`。
///
/// # 示例
/// ```rust
/// use langchain_compressors::utils::cosine_similarity_f64;
///
/// let similarity = cosine_similarity_f64(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
/// assert!((similarity - 1.0).abs() < 1e-10);
/// ```
pub fn cosine_similarity_f64(vec1: &[f64], vec2: &[f64]) -> f64 {
    if vec1.len() != vec2.len() {
        return 0.0;
    }

    let dot_product: f64 = vec1.iter().zip(vec2.iter()).map(|(a, b)| a * b).sum();
    let magnitude_vec1: f64 = vec1.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();
    let magnitude_vec2: f64 = vec2.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();

    if magnitude_vec1 == 0.0 || magnitude_vec2 == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_vec1 * magnitude_vec2)
}

/// 批量计算余弦相似度
///
/// 计算一个查询向量与多个目标向量的相似度，结果顺序与 `targets` 一致。
pub fn batch_cosine_similarity_f64(query: &[f64], targets: &[Vec<f64>]) -> Vec<f64> {
    targets
        .iter()
        .map(|target| cosine_similarity_f64(query, target))
        .collect()
}

/// 返回得分最高的 `k` 个下标，按得分降序排列
///
/// 得分相同时保留原始顺序（稳定排序）。
///
/// # 示例
/// ```rust
/// use langchain_compressors::utils::top_k_indices;
///
/// assert_eq!(top_k_indices(&[0.1, 0.9, 0.5], 2), vec![1, 2]);
/// ```
pub fn top_k_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });
    indices.truncate(k);
    indices
}
