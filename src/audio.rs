//! 语音预览音频的解码。
//!
//! 语音合成接口返回 Base64 编码的 16 位小端 PCM，
//! 这里把它解码为 `[-1.0, 1.0]` 区间的浮点采样，供上层播放或落盘。

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::{ComposerError, Result};

/// 语音合成输出的固定采样率（Hz）。
pub const SAMPLE_RATE: u32 = 24_000;

/// 把 Base64 编码的 16 位小端 PCM 解码为归一化浮点采样。
///
/// # Errors
///
/// Base64 解码失败时返回 [`ComposerError::Base64Decode`]；
/// 字节数为奇数说明数据被截断，返回 [`ComposerError::Internal`]。
pub fn decode_pcm_base64(data: &str) -> Result<Vec<f32>> {
    let bytes = STANDARD.decode(data)?;
    if bytes.len() % 2 != 0 {
        return Err(ComposerError::Internal(format!(
            "PCM 数据被截断: {} 字节不是 16 位采样的整数倍",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_decodes_known_samples() {
        let encoded = encode(&[0, 16384, -16384, i16::MAX, i16::MIN]);
        let samples = decode_pcm_base64(&encoded).unwrap();
        assert_eq!(samples.len(), 5);
        assert!((samples[0] - 0.0).abs() < 1e-6);
        assert!((samples[1] - 0.5).abs() < 1e-6);
        assert!((samples[2] + 0.5).abs() < 1e-6);
        assert!(samples[3] < 1.0 && samples[3] > 0.999);
        assert!((samples[4] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(matches!(
            decode_pcm_base64("not base64!!!"),
            Err(ComposerError::Base64Decode(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_pcm() {
        let encoded = STANDARD.encode([0u8, 1, 2]);
        assert!(matches!(
            decode_pcm_base64(&encoded),
            Err(ComposerError::Internal(_))
        ));
    }
}
