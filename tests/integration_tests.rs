//! Integration Tests
//!
//! End-to-end use of the public API: build a small dataset on disk, scan it,
//! load every file and turn it into training windows.

use std::fs;
use std::path::Path;

use aeiou::engine::{
    audio_float_to_int, batch_it_crazy, export_wav, get_dbmax, is_silence, load_audio,
    normalize_audio, AudioBuffer, ExportFormat, LoadOptions, NormMode, Waveform,
    DEFAULT_SILENCE_THRESHOLD_DB,
};
use aeiou::files::{get_audio_filenames, makedir, MakeDir};
use aeiou::nested::{untuple, Nested};
use aeiou::AeiouError;
use approx::assert_abs_diff_eq;
use ndarray::{array, s, Array2};
use tempfile::tempdir;

/// Helper to create a sine wave buffer with `channels` identical channels
fn sine_buffer(freq: f32, amplitude: f32, channels: usize, len: usize, sr: u32) -> AudioBuffer {
    let w = 2.0 * std::f32::consts::PI * freq / sr as f32;
    let channel: Vec<f32> = (0..len).map(|i| amplitude * (w * i as f32).sin()).collect();
    AudioBuffer::from_channels(vec![channel; channels], sr).unwrap()
}

fn write_dataset(root: &Path) {
    assert!(makedir(root.join("drums/kicks")).exists());
    export_wav(
        &sine_buffer(60.0, 0.5, 1, 4800, 48000),
        root.join("drums/kicks/kick.wav"),
        ExportFormat::pcm16(),
    )
    .unwrap();
    export_wav(
        &sine_buffer(440.0, 0.1, 2, 4410, 44100),
        root.join("pad.WAV"),
        ExportFormat::float32(),
    )
    .unwrap();
    export_wav(
        &AudioBuffer::new(2, 4800, 48000),
        root.join("silence.wav"),
        ExportFormat::pcm16(),
    )
    .unwrap();
    fs::write(root.join("README.txt"), "not audio").unwrap();
}

// === Dataset Pipeline Tests ===

#[test]
fn test_scan_load_and_window_dataset() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let scan = get_audio_filenames(&[dir.path()]);
    assert!(scan.is_complete());
    assert_eq!(scan.files.len(), 3);
    assert!(scan.files.iter().all(|f| !f.ends_with("README.txt")));

    let options = LoadOptions::new(48000)
        .with_verbose(false)
        .with_norm(NormMode::Channel);

    for file in &scan.files {
        let audio = load_audio(file, &options).unwrap();
        assert_eq!(audio.sample_rate, 48000);

        let windows = batch_it_crazy(&audio, 1024).unwrap();
        let (batch, channels, win_len) = windows.dim();
        assert_eq!(channels, audio.channels());
        assert_eq!(win_len, 1024);
        assert_eq!(batch, audio.len() / 1024 + 1);

        if file.ends_with("silence.wav") {
            assert!(is_silence(&audio, DEFAULT_SILENCE_THRESHOLD_DB));
        } else {
            assert!(!is_silence(&audio, DEFAULT_SILENCE_THRESHOLD_DB));
            assert_abs_diff_eq!(get_dbmax(&audio), 20.0 * 0.99_f32.log10(), epsilon = 1e-2);
        }
    }
}

#[test]
fn test_makedir_existing_is_noop() {
    let dir = tempdir().unwrap();
    assert!(matches!(makedir(dir.path()), MakeDir::Existed));
}

// === Numeric Property Tests ===

#[test]
fn test_global_normalization_hits_099_for_any_nonzero_peak() {
    for peak in [1e-4_f32, 0.3, 1.0, 7.5] {
        let audio = sine_buffer(100.0, peak, 2, 480, 48000);
        let out = normalize_audio(&audio, NormMode::Global);
        assert_abs_diff_eq!(out.max_abs(), 0.99, epsilon = 1e-5);
        assert!(out.max_abs() <= 0.99 + 1e-6);
    }
}

#[test]
fn test_batch_windows_preserve_sample_order() {
    let x = Array2::from_shape_fn((2, 10), |(c, i)| (c * 100 + i) as f32);
    let batch = batch_it_crazy(&x, 4).unwrap();

    assert_eq!(batch.dim(), (3, 2, 4));
    for c in 0..2 {
        let rejoined: Vec<f32> = batch.slice(s![.., c, ..]).iter().copied().collect();
        assert_eq!(&rejoined[..10], x.row(c).to_vec().as_slice());
        assert_eq!(&rejoined[10..], &[0.0, 0.0]);
    }
}

#[test]
fn test_pcm_conversion_of_loaded_audio() {
    let audio = sine_buffer(440.0, 0.5, 1, 100, 48000);
    let pcm = audio_float_to_int(&audio.to_array());
    assert_eq!(pcm.dim(), (1, 100));
    assert!(pcm.iter().all(|&s| (-16384..=16384).contains(&s)));

    let quirk = audio_float_to_int(&array![[1.5_f32, -1.5, 0.0]]);
    assert_eq!(quirk, array![[-32768_i16, -32768, 0]]);
}

#[test]
fn test_untuple_model_output() {
    let output = Nested::seq([Nested::seq([Nested::leaf(array![0.25_f32, 0.5])]), Nested::leaf(array![1.0])]);
    assert_eq!(untuple(&output).unwrap(), &array![0.25_f32, 0.5]);

    let empty: Nested<f32> = Nested::seq([]);
    assert!(matches!(untuple(&empty), Err(AeiouError::EmptySequence)));
}
