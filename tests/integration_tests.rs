//! # Integration Tests for AdaptiveDrive
//!
//! End-to-end checks of the public library API and the `adaptive-drive`
//! binary.

use adaptive_drive::catalog::{Catalog, Music, TrackType};
use adaptive_drive::context::{DriveContext, Weather};
use adaptive_drive::mode::{classify, OperatingMode};
use adaptive_drive::playlist::{generate, PlaylistGenerator};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test helper to write a small catalog file into a temp directory
fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("catalog.json");

    std::fs::write(
        &path,
        r#"[
            {"id": "1", "title": "Overdrive", "artist": "Test Artist 1", "type": "energetic", "bpm": 150},
            {"id": "2", "title": "Lullaby", "artist": "Test Artist 2", "type": "calm", "bpm": 64},
            {"id": "3", "title": "Concentrate", "artist": "Test Artist 3", "type": "focus"},
            {"id": "4", "title": "Drift", "artist": "Test Artist 4", "type": "ambient", "duration_secs": 300}
        ]"#,
    )?;

    Ok((temp_dir, path))
}

fn mixed_catalog() -> Vec<Music> {
    (0..40)
        .map(|i| {
            let track_type = TrackType::ALL[i % TrackType::ALL.len()];
            Music::new(&format!("t{i}"), &format!("Track {i}"), &format!("Artist {}", i % 7), track_type)
                .with_bpm(60 + (i as u32 * 7) % 100)
        })
        .collect()
}

fn sample_contexts() -> Vec<DriveContext> {
    let mut contexts = Vec::new();
    for weather in Weather::ALL {
        for speed in [0.0, 45.0, 90.0, 91.0, 140.0, -5.0] {
            for hour in [0.0, 4.99, 5.0, 12.0, 20.0, 20.01, 23.9, 26.0] {
                contexts.push(DriveContext::new(speed, hour, weather));
            }
        }
    }
    contexts
}

fn run_cli(config_dir: &Path, args: &[&str]) -> Output {
    let config = config_dir.join("config.json");
    Command::new(env!("CARGO_BIN_EXE_adaptive-drive"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to run adaptive-drive")
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_documented_boundaries() {
        let cases = [
            (90.0, 12.0, OperatingMode::StandardAdaptive),
            (91.0, 12.0, OperatingMode::HighSpeedFocus),
            (0.0, 20.0, OperatingMode::StandardAdaptive),
            (0.0, 20.01, OperatingMode::NightModeRelax),
            (0.0, 4.99, OperatingMode::NightModeRelax),
            (0.0, 5.0, OperatingMode::StandardAdaptive),
            (95.0, 23.0, OperatingMode::HighSpeedFocus),
        ];

        for (speed, hour, expected) in cases {
            let context = DriveContext::new(speed, hour, Weather::Clear);
            assert_eq!(classify(&context), expected, "speed {speed}, hour {hour}");
        }
    }

    #[test]
    fn test_classification_is_total_and_deterministic() {
        for context in sample_contexts() {
            let mode = classify(&context);
            assert!(OperatingMode::ALL.contains(&mode));
            assert_eq!(mode, classify(&context));
        }
    }
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[test]
    fn test_group_integrity_over_many_contexts() {
        let catalog = mixed_catalog();
        for context in sample_contexts() {
            let playlist = generate(&catalog, &context);
            let priority = playlist.mode().priority();

            let mut seen_non_matching = false;
            for track in playlist.tracks() {
                let matches = priority.matches(track.track_type);
                assert!(
                    !(matches && seen_non_matching),
                    "matching track {} after a non-matching one for {context}",
                    track.id
                );
                seen_non_matching |= !matches;
            }
        }
    }

    #[test]
    fn test_first_track_matches_mode_when_possible() {
        let catalog = mixed_catalog();
        for context in sample_contexts() {
            let playlist = generate(&catalog, &context);
            let first = playlist.first().expect("catalog is not empty");
            assert!(playlist.mode().priority().matches(first.track_type));
            assert_eq!(playlist.active_filter(), first.track_type.as_str().to_uppercase());
        }
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let catalog = mixed_catalog();
        let catalog_before = catalog.clone();
        let context = DriveContext::new(120.0, 22.0, Weather::Storm);
        let context_before = context;

        let first = generate(&catalog, &context).into_tracks();
        let second = generate(&catalog, &context).into_tracks();

        assert_eq!(first, second);
        assert_eq!(catalog, catalog_before);
        assert_eq!(context, context_before);

        // Output borrows the catalog's own entries.
        for track in first {
            assert!(catalog.iter().any(|entry| std::ptr::eq(entry, track)));
        }
    }

    #[test]
    fn test_empty_catalog() {
        for context in sample_contexts() {
            let playlist = generate(&[], &context);
            assert!(playlist.is_empty());
            assert_eq!(playlist.active_filter(), "MIXED");
        }
    }

    #[test]
    fn test_batch_matches_sequential_generation() {
        let catalog = mixed_catalog();
        let contexts = sample_contexts();
        let generator = PlaylistGenerator::new(&catalog);

        let batch = generator.generate_batch(&contexts);
        assert_eq!(batch.len(), contexts.len());
        for (context, playlist) in contexts.iter().zip(&batch) {
            assert_eq!(playlist, &generator.generate(context));
        }
    }

    #[test]
    fn test_loaded_catalog_drives_generation() -> Result<()> {
        let (_temp_dir, path) = create_test_catalog()?;
        let catalog = Catalog::load(&path)?;

        let playlist = generate(catalog.tracks(), &DriveContext::new(30.0, 22.0, Weather::Clear));
        let titles: Vec<_> = playlist.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Lullaby", "Drift", "Overdrive", "Concentrate"]);
        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = run_cli(temp_dir.path(), &["--help"]);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        for command in ["classify", "generate", "watch", "batch", "catalog", "completion"] {
            assert!(stdout.contains(command), "help is missing `{command}'");
        }
        Ok(())
    }

    #[test]
    fn test_classify_command() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = run_cli(temp_dir.path(), &["classify", "--speed", "95", "--time", "23"]);

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "HIGH_SPEED_FOCUS");
        Ok(())
    }

    #[test]
    fn test_generate_verbose_with_catalog_file() -> Result<()> {
        let (temp_dir, catalog) = create_test_catalog()?;
        let output = run_cli(
            temp_dir.path(),
            &["generate", "--speed", "20", "--time", "2", "--catalog", &catalog.to_string_lossy(), "--verbose"],
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Rule: NIGHT_MODE_RELAX"));
        assert!(stdout.contains("Filter: CALM priority"));
        assert!(stdout.contains("Lullaby"));
        Ok(())
    }

    #[test]
    fn test_generate_json_output() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = run_cli(temp_dir.path(), &["generate", "--speed", "120", "--json"]);

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["mode"], "HIGH_SPEED_FOCUS");
        assert!(value["tracks"].as_array().is_some_and(|tracks| !tracks.is_empty()));
        Ok(())
    }

    #[test]
    fn test_config_thresholds_are_honoured() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"thresholds": {"high_speed_kmh": 150}}"#,
        )?;

        let output = run_cli(temp_dir.path(), &["classify", "--speed", "120", "--time", "12"]);
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "STANDARD_ADAPTIVE");
        Ok(())
    }

    #[test]
    fn test_batch_command() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("contexts.json");
        std::fs::write(
            &input,
            r#"[{"speed": 100, "timeOfDay": 12}, {"speed": 10, "timeOfDay": 22, "weather": "fog"}]"#,
        )?;

        let output = run_cli(temp_dir.path(), &["batch", &input.to_string_lossy()]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());

        let high = stdout.find("HIGH_SPEED_FOCUS").expect("first context evaluated");
        let night = stdout.find("NIGHT_MODE_RELAX").expect("second context evaluated");
        assert!(high < night, "results must keep input order");
        Ok(())
    }

    #[test]
    fn test_missing_catalog_file_fails() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = run_cli(temp_dir.path(), &["catalog", "--catalog", "/no/such/catalog.json"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("catalog"));
        Ok(())
    }

    #[test]
    fn test_completion_generation() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = run_cli(temp_dir.path(), &["completion", "bash"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("adaptive-drive"));
        assert!(stdout.contains("complete"));
        Ok(())
    }
}
