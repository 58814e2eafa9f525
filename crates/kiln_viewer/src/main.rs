//! Headless driver: renders frames from either pipeline and writes PNGs.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use kiln_core::{CopyTarget, FrameSource, RenderThread};
use kiln_raster::{RasterConfig, Rasterizer};
use kiln_tracer::{RayTracer, TracerConfig};
use serde::{Deserialize, Serialize};

const HELP: &str = "\
kiln_viewer - render frames from the kiln software pipelines

USAGE:
  kiln_viewer [OPTIONS]

OPTIONS:
  --pipeline NAME   raster | tracer            [default: tracer]
  --width W         output width in pixels     [default: 640]
  --height H        output height in pixels    [default: 480]
  --frames N        number of frames to write  [default: 1]
  --config FILE     JSON file with optional `raster` and `tracer` sections
  --out DIR         output directory           [default: frames]
  --threaded        render on a background thread
  -h, --help        print this help
";

/// How long to wait for the background thread to deliver one frame.
const FRAME_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pipeline {
    Raster,
    Tracer,
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raster" => Ok(Pipeline::Raster),
            "tracer" => Ok(Pipeline::Tracer),
            other => Err(format!("unknown pipeline '{}', expected raster or tracer", other)),
        }
    }
}

/// Settings file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ViewerConfig {
    raster: RasterConfig,
    tracer: TracerConfig,
}

#[derive(Debug)]
struct Args {
    pipeline: Pipeline,
    width: u32,
    height: u32,
    frames: u32,
    config: Option<PathBuf>,
    out: PathBuf,
    threaded: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let args = Args {
        pipeline: pargs
            .opt_value_from_str("--pipeline")?
            .unwrap_or(Pipeline::Tracer),
        width: pargs.opt_value_from_str("--width")?.unwrap_or(640),
        height: pargs.opt_value_from_str("--height")?.unwrap_or(480),
        frames: pargs.opt_value_from_str("--frames")?.unwrap_or(1),
        config: pargs.opt_value_from_os_str("--config", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })?,
        out: pargs
            .opt_value_from_os_str("--out", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })?
            .unwrap_or_else(|| PathBuf::from("frames")),
        threaded: pargs.contains("--threaded"),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?}", rest);
    }
    if args.width == 0 || args.height == 0 {
        bail!("output size must be non-zero, got {}x{}", args.width, args.height);
    }
    Ok(Some(args))
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write a B, G, R canvas with the given pitch as an RGB PNG.
fn write_png(path: &Path, bgr: &[u8], width: u32, height: u32, pitch: usize) -> Result<()> {
    let row_len = width as usize * 3;
    let mut rgb = Vec::with_capacity(row_len * height as usize);
    for row in bgr.chunks(pitch).take(height as usize) {
        for px in row[..row_len].chunks_exact(3) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    }

    let image = image::RgbImage::from_raw(width, height, rgb)
        .context("Canvas does not match the output size")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn frame_path(out: &Path, index: u32) -> PathBuf {
    out.join(format!("frame_{:04}.png", index))
}

/// Render on the calling thread.
fn run_inline<S: FrameSource>(mut source: S, args: &Args) -> Result<()> {
    let pitch = args.width as usize * 3;
    let mut canvas = vec![0u8; pitch * args.height as usize];

    for index in 0..args.frames {
        let start = Instant::now();
        source.render();
        source
            .copy_buffer(&mut CopyTarget::new(&mut canvas, args.width, args.height, pitch))
            .context("Failed to copy frame")?;

        let path = frame_path(&args.out, index);
        write_png(&path, &canvas, args.width, args.height, pitch)?;
        log::info!(
            "Wrote {} ({:.1} ms)",
            path.display(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
    Ok(())
}

/// Render on a background thread, copying each frame as it arrives.
///
/// The copy is at the source resolution; `--width`/`--height` size the source.
fn run_threaded<S: FrameSource + 'static>(source: S, args: &Args) -> Result<()> {
    let (width, height) = source.dimensions();
    let pitch = width as usize * 3;
    let mut canvas = vec![0u8; pitch * height as usize];
    let mut thread = RenderThread::spawn(source).context("Failed to start render thread")?;

    for index in 0..args.frames {
        if !thread.wait_copy(&mut canvas, pitch, FRAME_TIMEOUT)? {
            bail!("Timed out waiting for frame {}", index);
        }
        let path = frame_path(&args.out, index);
        write_png(&path, &canvas, width, height, pitch)?;
        log::info!("Wrote {}", path.display());
    }

    thread.shutdown()?;
    Ok(())
}

fn run<S: FrameSource + 'static>(source: S, args: &Args) -> Result<()> {
    if args.threaded {
        run_threaded(source, args)
    } else {
        run_inline(source, args)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let config = load_config(args.config.as_deref())?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    log::info!(
        "Rendering {} frame(s) of the {:?} pipeline at {}x{}",
        args.frames,
        args.pipeline,
        args.width,
        args.height
    );

    match args.pipeline {
        Pipeline::Raster => {
            let rasterizer = Rasterizer::demo(args.width, args.height, config.raster)
                .context("Failed to create rasterizer")?;
            run(rasterizer, &args)
        }
        Pipeline::Tracer => {
            let tracer = RayTracer::new(args.width, args.height, config.tracer)
                .context("Failed to create ray tracer")?;
            run(tracer, &args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_names() {
        assert_eq!("raster".parse::<Pipeline>(), Ok(Pipeline::Raster));
        assert_eq!("tracer".parse::<Pipeline>(), Ok(Pipeline::Tracer));
        assert!("opengl".parse::<Pipeline>().is_err());
    }

    #[test]
    fn test_config_sections_are_optional() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "tracer": { "fov_degrees": 45.0 } }"#).unwrap();
        assert_eq!(config.tracer.fov_degrees, 45.0);
        assert_eq!(config.raster, RasterConfig::default());
    }

    #[test]
    fn test_frame_path_is_zero_padded() {
        assert_eq!(
            frame_path(Path::new("out"), 7),
            PathBuf::from("out").join("frame_0007.png")
        );
    }
}
