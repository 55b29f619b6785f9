//! Windowing: chop a long series into a batch of fixed-length windows

use ndarray::{s, Array2, Array3};

use crate::engine::waveform::Waveform;
use crate::error::{AeiouError, Result};

/// Chop a long sequence into a batch of `win_len` windows (pun intended)
///
/// The output has shape `(n_windows, channels, win_len)` with
/// `n_windows = len / win_len + 1`. The tail is zero-padded, so an input whose
/// length is an exact multiple of `win_len` still gains one all-zero window.
///
/// # Errors
/// `InvalidParameter` if `win_len` is zero or the padded batch would overflow.
pub fn batch_it_crazy<W: Waveform>(x: &W, win_len: usize) -> Result<Array3<f32>> {
    if win_len == 0 {
        return Err(AeiouError::InvalidParameter {
            name: "win_len",
            reason: "window length must be at least 1".to_string(),
        });
    }

    let x = x.to_channels();
    let (channels, x_len) = x.dim();
    let n_windows = x_len / win_len + 1;
    let padded_len = win_len
        .checked_mul(n_windows)
        .filter(|&len| {
            channels
                .checked_mul(len)
                .and_then(|n| n.checked_mul(std::mem::size_of::<f32>()))
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| AeiouError::InvalidParameter {
            name: "win_len",
            reason: format!("{} windows of {} samples do not fit in memory", n_windows, win_len),
        })?;

    let mut padded = Array2::<f32>::zeros((channels, padded_len));
    padded.slice_mut(s![.., ..x_len]).assign(&x);

    // (d, b*n) -> (d, b, n) -> (b, d, n)
    let batch = padded
        .into_shape((channels, n_windows, win_len))?
        .permuted_axes([1, 0, 2]);

    Ok(batch.as_standard_layout().into_owned())
}
