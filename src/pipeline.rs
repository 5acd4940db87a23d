use anyhow::{Context, Result, anyhow};
use std::{fs, io::Read, path::Path};

use crate::{
    cli::ExportCmd,
    config::Config,
    export::{Outcome, render},
    formats::SubtitleFormat,
    ingest::ingest,
    model::Timeline,
};

pub fn run_export(cmd: ExportCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("export", input = cmd.input.as_str());
    let _g = span.enter();

    let raw = read_input_to_string(&cmd.input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let stem = cmd
        .stem
        .clone()
        .unwrap_or_else(|| cfg.export.file_stem.clone());
    let parallel = cmd.parallel || cfg.export.parallel;

    let outcome = match ingest(&raw) {
        Ok(timeline) => {
            log_timeline_samples(&timeline, cfg);
            Outcome::Exports(render(&timeline, parallel))
        }
        Err(failure) => Outcome::Salvage(failure.into()),
    };

    match outcome {
        Outcome::Exports(set) => {
            if let Some(fmt) = cmd.stdout {
                let artifact = set
                    .get(fmt)
                    .ok_or_else(|| anyhow!("no {fmt} document produced"))?;
                print!("{}", artifact.document);
                tracing::info!(mode = "stdout", format = fmt.label(), "wrote output");
                return Ok(());
            }

            let wanted = selected_formats(&cmd, cfg);
            fs::create_dir_all(&cmd.out_dir).with_context(|| {
                format!("failed creating output dir: {}", cmd.out_dir.display())
            })?;
            for artifact in set.iter().filter(|a| wanted.contains(&a.format)) {
                let path = cmd.out_dir.join(artifact.file_name(&stem));
                write_output(&path, &artifact.document, cmd.overwrite)?;
                tracing::info!(
                    path = %path.display(),
                    format = artifact.label(),
                    mime = artifact.mime(),
                    "wrote output file"
                );
            }

            if !set.failures().is_empty() {
                return Err(anyhow!(
                    "{} format(s) failed to render; placeholders were written",
                    set.failures().len()
                ));
            }
        }
        Outcome::Salvage(salvage) => {
            tracing::warn!(
                reason = %salvage.failure.reason,
                "payload could not be decoded; delivering raw text for manual recovery"
            );

            if cmd.stdout.is_some() {
                print!("{}", salvage.text());
                return Ok(());
            }

            fs::create_dir_all(&cmd.out_dir).with_context(|| {
                format!("failed creating output dir: {}", cmd.out_dir.display())
            })?;
            let path = cmd.out_dir.join(salvage.file_name(&stem));
            write_output(&path, salvage.text(), cmd.overwrite)?;
            tracing::info!(path = %path.display(), mime = salvage.mime(), "wrote salvage file");
        }
    }

    Ok(())
}

fn selected_formats(cmd: &ExportCmd, cfg: &Config) -> Vec<SubtitleFormat> {
    if cmd.formats.is_empty() {
        cfg.export.formats.clone()
    } else {
        cmd.formats.clone()
    }
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading input: {input}"))
    }
}

fn log_timeline_samples(t: &Timeline, cfg: &Config) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let n = cfg.logging.debug_cue_samples.min(t.len());
    for (i, seg) in t.iter().take(n).enumerate() {
        tracing::debug!(
            idx = i,
            start = seg.start,
            end = seg.end,
            chars = seg.text.chars().count(),
            "cue sample"
        );
    }
}

fn write_output(path: &Path, data: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {}",
            path.display()
        ));
    }
    fs::write(path, data).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
