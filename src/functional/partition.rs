//! 配列操作 - 分割関数

use crate::array::Array;
use crate::error::{Result, TsumikiError};

/// chunk - size個ずつの連続した部分配列に分割する
///
/// 最後のチャンクはsize未満になりうる。`preserve_keys`がfalseなら各チャンク内を連番に振り直す。
pub fn chunk<V: Clone>(
    array: &Array<V>,
    size: usize,
    preserve_keys: bool,
) -> Result<Array<Array<V>>> {
    if size == 0 {
        return Err(TsumikiError::must_be_positive("chunk", "size"));
    }

    let mut chunks = Array::new();
    let mut current = Array::new();
    for (key, value) in array.iter() {
        if preserve_keys {
            current.insert(key.clone(), value.clone());
        } else {
            current.push(value.clone())?;
        }
        if current.len() == size {
            chunks.push(std::mem::take(&mut current))?;
        }
    }
    if !current.is_empty() {
        chunks.push(current)?;
    }
    Ok(chunks)
}

/// window - 幅widthのスライディングウィンドウ（1つずつずらす）
///
/// 各ウィンドウは位置で切り出し、整数キーは連番に振り直す（文字列キーは残る）。
/// 幅0と要素数を超える幅はどちらも引数エラー。
pub fn window<V: Clone>(array: &Array<V>, width: usize) -> Result<Array<Array<V>>> {
    if width == 0 {
        return Err(TsumikiError::window_width_zero());
    }
    if width > array.len() {
        return Err(TsumikiError::window_too_wide(width, array.len()));
    }

    Ok(Array::from_values(
        (0..=array.len() - width).map(|start| array.slice(start, start + width)),
    ))
}
