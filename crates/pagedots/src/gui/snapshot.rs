use crate::config::PaintMode;
use crate::gui::dots;
use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface};
use metaball::RenderPlan;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("PNG encoding error: {0}")]
    Png(#[from] cairo::IoError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders `plan` onto a transparent `width` x `height` image at `path`.
pub fn write_png(
    path: &Path,
    (width, height): (i32, i32),
    plan: &RenderPlan,
    colors: &ThemeColors,
    mode: PaintMode,
) -> Result<(), SnapshotError> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&surface)?;
        dots::draw(&cr, plan, colors, mode)?;
    }
    surface.flush();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs_err::create_dir_all(parent)?;
    }
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
