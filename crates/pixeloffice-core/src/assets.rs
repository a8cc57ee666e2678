//! Sprite sheet registry - one asset per role, loaded once
//!
//! Loading happens outside the simulation: the host fetches each role's
//! image however it likes and reports the natural size back, either directly
//! or as raw PNG bytes. Until then the role is `Pending` and its agents are
//! not drawn. A failed load leaves the role unrenderable for the session.

use pixeloffice_logic::roster::sprite_path;
use pixeloffice_logic::sprite::{SpriteGrid, SpriteRenderConfig};
use pixeloffice_logic::types::Role;
use image::GenericImageView;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// Load state of one role's sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState {
    Pending,
    Ready(SpriteRenderConfig),
    Failed(String),
}

/// Registry of sprite sheets and their resolved geometry.
#[derive(Debug, Clone)]
pub struct SpriteAssets {
    grid: SpriteGrid,
    base_frame_width: f32,
    states: HashMap<Role, AssetState>,
}

impl SpriteAssets {
    pub fn new(grid: SpriteGrid, base_frame_width: f32) -> Self {
        let states = Role::ALL
            .iter()
            .map(|role| (*role, AssetState::Pending))
            .collect();
        Self {
            grid,
            base_frame_width,
            states,
        }
    }

    pub fn grid(&self) -> &SpriteGrid {
        &self.grid
    }

    /// Static path of a role's sheet.
    pub fn path(&self, role: Role) -> &'static str {
        sprite_path(role)
    }

    pub fn state(&self, role: Role) -> &AssetState {
        self.states.get(&role).unwrap_or(&AssetState::Pending)
    }

    /// Resolved geometry, `None` until the sheet has loaded.
    pub fn geometry(&self, role: Role) -> Option<&SpriteRenderConfig> {
        match self.states.get(&role) {
            Some(AssetState::Ready(geo)) => Some(geo),
            _ => None,
        }
    }

    pub fn pending_roles(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| *self.state(*r) == AssetState::Pending)
            .collect()
    }

    pub fn all_ready(&self) -> bool {
        Role::ALL.iter().all(|r| self.geometry(*r).is_some())
    }

    /// Record a loaded sheet's natural size.
    ///
    /// One-shot: once a role has settled (ready or failed) later reports
    /// are ignored and the settled result is returned.
    pub fn complete(
        &mut self,
        role: Role,
        natural_width: u32,
        natural_height: u32,
    ) -> Result<SpriteRenderConfig, AssetError> {
        match self.state(role) {
            AssetState::Ready(geo) => return Ok(*geo),
            AssetState::Failed(reason) => return Err(AssetError::Failed(reason.clone())),
            AssetState::Pending => {}
        }

        match SpriteRenderConfig::resolve(
            natural_width,
            natural_height,
            &self.grid,
            self.base_frame_width,
        ) {
            Some(geo) => {
                log::info!(
                    "Sprite {} ready: {}x{} -> scale {:.3}, frame {}x{:.0}",
                    role,
                    natural_width,
                    natural_height,
                    geo.scale_factor,
                    geo.frame_width,
                    geo.frame_height
                );
                self.states.insert(role, AssetState::Ready(geo));
                Ok(geo)
            }
            None => {
                let err = AssetError::ZeroSize;
                self.fail(role, &err);
                Err(err)
            }
        }
    }

    /// Record a loaded sheet from raw image bytes.
    pub fn complete_png(&mut self, role: Role, bytes: &[u8]) -> Result<SpriteRenderConfig, AssetError> {
        match image_dimensions(bytes) {
            Ok((w, h)) => self.complete(role, w, h),
            Err(err) => {
                self.fail(role, &err);
                Err(err)
            }
        }
    }

    /// Mark a role as unloadable.
    pub fn fail(&mut self, role: Role, err: &AssetError) {
        if *self.state(role) != AssetState::Pending {
            return;
        }
        log::warn!("Sprite {} ({}) failed to load: {}", role, self.path(role), err);
        self.states.insert(role, AssetState::Failed(err.to_string()));
    }

    /// Load every pending role from a directory mirroring the asset paths.
    ///
    /// Returns the number of roles that became ready. Failures are recorded
    /// per role and do not stop the other loads.
    pub fn load_dir(&mut self, root: &Path) -> usize {
        let mut loaded = 0;
        for role in self.pending_roles() {
            let file = root.join(self.path(role).trim_start_matches('/'));
            let result = std::fs::read(&file)
                .map_err(AssetError::from)
                .and_then(|bytes| self.complete_png(role, &bytes));
            match result {
                Ok(_) => loaded += 1,
                Err(err @ AssetError::Io(_)) => self.fail(role, &err),
                Err(_) => {}
            }
        }
        loaded
    }
}

/// Decode a sprite sheet and return its natural size.
///
/// The whole image is decoded so a sheet with a valid header but broken
/// data is rejected.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), AssetError> {
    let sheet = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    let (width, height) = sheet.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::ZeroSize);
    }
    Ok((width, height))
}

/// Errors that can occur while loading a sprite sheet
#[derive(Debug)]
pub enum AssetError {
    Io(std::io::Error),
    Image(image::ImageError),
    ZeroSize,
    /// The role already failed earlier in the session.
    Failed(String),
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::Image(e)
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(e) => write!(f, "IO error: {}", e),
            AssetError::Image(e) => write!(f, "Image error: {}", e),
            AssetError::ZeroSize => write!(f, "image has zero size"),
            AssetError::Failed(reason) => write!(f, "previously failed: {}", reason),
        }
    }
}

impl std::error::Error for AssetError {}
