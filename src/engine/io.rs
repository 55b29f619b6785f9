//! Audio file I/O for aeiou
//!
//! Loads audio files into multichannel [`AudioBuffer`]s at a requested sample
//! rate. WAV files are read with `hound`; every other container (MP3, FLAC,
//! OGG, AIFF, ...) goes through `symphonia`. Both paths keep all channels.
//! Rate conversion uses `rubato`'s band-limited sinc resampler.

use std::fs::File;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use serde::{Deserialize, Serialize};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::engine::buffer::{AudioBuffer, DEFAULT_SAMPLE_RATE};
use crate::engine::normalize::{normalize_audio, NormMode};
use crate::error::{AeiouError, Result};

/// Options for [`load_audio`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Target sample rate in Hz (default: 48000)
    pub sample_rate: u32,
    /// Log a notice when the file has to be resampled (default: true)
    pub verbose: bool,
    /// Normalization applied after loading (default: none)
    pub norm: NormMode,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            sample_rate: DEFAULT_SAMPLE_RATE,
            verbose: true,
            norm: NormMode::None,
        }
    }
}

impl LoadOptions {
    /// Default options at the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        LoadOptions {
            sample_rate,
            ..Default::default()
        }
    }

    pub fn with_norm(mut self, norm: NormMode) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// WAV export configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Bit depth: 16, 24, or 32 (float)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat { bit_depth: 24 }
    }
}

impl ExportFormat {
    /// 16-bit integer PCM
    pub fn pcm16() -> Self {
        ExportFormat { bit_depth: 16 }
    }

    /// 32-bit float
    pub fn float32() -> Self {
        ExportFormat { bit_depth: 32 }
    }
}

/// Load an audio file as a multichannel buffer at `options.sample_rate`
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `UnsupportedFormat` - If no decoder understands the file
/// * `InvalidAudio` - If the file cannot be decoded
/// * `Resample` - If rate conversion fails
pub fn load_audio(path: impl AsRef<Path>, options: &LoadOptions) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let mut audio = decode_audio(path)?;

    if audio.sample_rate != options.sample_rate {
        if options.verbose {
            info!(
                "Resampling {} from {} Hz to {} Hz",
                path.display(),
                audio.sample_rate,
                options.sample_rate
            );
        }
        let resampled = resample_channels(&audio.samples, audio.sample_rate, options.sample_rate)?;
        audio = AudioBuffer::from_channels(resampled, options.sample_rate)?;
    }

    if options.norm != NormMode::None {
        audio = normalize_audio(&audio, options.norm);
    }

    Ok(audio)
}

/// Decode an audio file at its native sample rate
pub fn decode_audio(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AeiouError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    if is_wav(path) {
        decode_wav(path)
    } else {
        decode_with_symphonia(path)
    }
}

/// Write a buffer to a WAV file at the buffer's own sample rate
pub fn export_wav(buffer: &AudioBuffer, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
    let sample_format = match format.bit_depth {
        16 | 24 => SampleFormat::Int,
        32 => SampleFormat::Float,
        _ => {
            return Err(AeiouError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 24, 32 supported)", format.bit_depth),
            });
        }
    };

    let spec = WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec).map_err(wav_io_error)?;

    for sample in buffer.to_interleaved() {
        match format.bit_depth {
            16 => {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer.write_sample(scaled).map_err(wav_io_error)?;
            }
            24 => {
                // 24-bit stored as i32 in hound
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer.write_sample(scaled).map_err(wav_io_error)?;
            }
            _ => writer.write_sample(sample).map_err(wav_io_error)?,
        }
    }

    writer.finalize().map_err(wav_io_error)?;
    Ok(())
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "wav" | "wave"))
        .unwrap_or(false)
}

fn wav_io_error(e: hound::Error) -> AeiouError {
    match e {
        hound::Error::IoError(io) => AeiouError::Io(io),
        other => AeiouError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

fn decode_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = WavReader::open(path).map_err(|e| AeiouError::InvalidAudio {
        reason: format!("Failed to open WAV file {}: {}", path.display(), e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

    AudioBuffer::from_interleaved(&interleaved, channels, spec.sample_rate)
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let invalid = |e: hound::Error| AeiouError::InvalidAudio {
        reason: format!("Failed to read {}-bit samples: {}", bits_per_sample, e),
        source: Some(Box::new(e)),
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        SampleFormat::Int => {
            let scale = match bits_per_sample {
                8 => 128.0,
                16 => 32768.0,
                24 => 8388608.0,
                32 => 2147483648.0,
                _ => {
                    return Err(AeiouError::UnsupportedFormat {
                        format: format!("{}-bit integer audio", bits_per_sample),
                    })
                }
            };
            // hound widens every integer depth into i32
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(invalid)
        }
    }
}

fn symphonia_error(path: &Path, err: SymphoniaError) -> AeiouError {
    match err {
        SymphoniaError::Unsupported(what) => AeiouError::UnsupportedFormat {
            format: format!("{} ({})", path.display(), what),
        },
        SymphoniaError::IoError(e) => AeiouError::Io(e),
        other => AeiouError::InvalidAudio {
            reason: format!("Failed to decode {}: {}", path.display(), other),
            source: Some(Box::new(other)),
        },
    }
}

fn decode_with_symphonia(path: &Path) -> Result<AudioBuffer> {
    let src = File::open(path).map_err(|e| AeiouError::FileNotFound {
        path: path.display().to_string(),
        source: Some(e),
    })?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| symphonia_error(path, e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AeiouError::UnsupportedFormat {
            format: format!("{} (no supported audio tracks)", path.display()),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| symphonia_error(path, e))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            // The track list changed mid-stream; keep what was decoded so far.
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => return Err(symphonia_error(path, err)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = Some(spec.rate);
                channels = Some(spec.channels.count());

                let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                sample_buf.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(sample_buf.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!("Skipping undecodable packet in {}: {}", path.display(), msg);
            }
            Err(err) => return Err(symphonia_error(path, err)),
        }
    }

    let sample_rate = sample_rate.ok_or_else(|| AeiouError::InvalidAudio {
        reason: format!("{} does not declare a sample rate", path.display()),
        source: None,
    })?;

    AudioBuffer::from_interleaved(&interleaved, channels.unwrap_or(1), sample_rate)
}

/// Resample every channel with a band-limited sinc interpolator
fn resample_channels(
    channels: &[Vec<f32>],
    source_rate: u32,
    target_rate: u32,
) -> Result<Vec<Vec<f32>>> {
    let fail = |reason: String| AeiouError::Resample {
        from_rate: source_rate,
        to_rate: target_rate,
        reason,
    };

    if source_rate == 0 || target_rate == 0 {
        return Err(fail("sample rates must be non-zero".to_string()));
    }

    let num_samples = channels.first().map(|ch| ch.len()).unwrap_or(0);
    if channels.is_empty() || num_samples == 0 {
        return Ok(channels.to_vec());
    }

    // One filter length of trailing silence flushes the last input frames
    // through the sinc kernel.
    const SINC_LEN: usize = 256;

    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = target_rate as f64 / source_rate as f64;
    let padded: Vec<Vec<f32>> = channels
        .iter()
        .map(|ch| {
            let mut ch = ch.clone();
            ch.resize(num_samples + SINC_LEN, 0.0);
            ch
        })
        .collect();

    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 2.0, params, padded[0].len(), channels.len())
            .map_err(|e| fail(e.to_string()))?;

    let mut resampled = resampler
        .process(&padded, None)
        .map_err(|e| fail(e.to_string()))?;

    let target_len = resampled_len(num_samples, source_rate, target_rate);
    for ch in &mut resampled {
        ch.resize(target_len, 0.0);
    }
    Ok(resampled)
}

/// Frames produced by converting `num_samples` frames: `ceil(n * to / from)`
fn resampled_len(num_samples: usize, source_rate: u32, target_rate: u32) -> usize {
    let (from, to) = (source_rate as u64, target_rate as u64);
    ((num_samples as u64 * to + from - 1) / from) as usize
}

// ============================================================================
// Tests
// ============================================================================
