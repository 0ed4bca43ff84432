//! # Render Surfaces
//!
//! Every quadrant owns a render surface obtained from a [`SurfaceFactory`].
//! The grid asks for a surface when it creates a quadrant and hands it back
//! when the quadrant's column is recycled. Release is synchronous: by the
//! time `update_window` returns, every recycled surface has been released.

use bytemuck::{Pod, Zeroable};

/// Size the grid requests for each quadrant surface.
pub const QUADRANT_SURFACE_SIZE: (u32, u32) = (1, 1);

/// Creates and releases per-quadrant render surfaces.
pub trait SurfaceFactory {
    /// The surface type stored in each quadrant.
    type Surface;

    /// Creates a surface of the given pixel size.
    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;

    /// Releases a surface whose quadrant was destroyed.
    fn release_surface(&mut self, surface: Self::Surface) {
        drop(surface);
    }
}

/// Factory for grids that never draw. Surfaces are `()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSurfaces {
    created: u64,
    released: u64,
}

impl HeadlessSurfaces {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            created: 0,
            released: 0,
        }
    }

    /// Surfaces handed out so far.
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.created
    }

    /// Surfaces returned so far.
    #[must_use]
    pub const fn released(&self) -> u64 {
        self.released
    }

    /// Surfaces currently held by quadrants.
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.created - self.released
    }
}

impl SurfaceFactory for HeadlessSurfaces {
    type Surface = ();

    fn create_surface(&mut self, _width: u32, _height: u32) {
        self.created += 1;
    }

    fn release_surface(&mut self, (): ()) {
        self.released += 1;
    }
}

/// An RGBA8 pixel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A CPU pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Creates a transparent canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixel data as bytes, row-major RGBA8, ready for texture upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Resizes the canvas, clearing it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Rgba::TRANSPARENT);
    }

    /// Returns the 2D drawing context.
    pub fn context(&mut self) -> CanvasContext<'_> {
        CanvasContext { canvas: self }
    }
}

/// 2D drawing operations on a [`Canvas`].
pub struct CanvasContext<'a> {
    canvas: &'a mut Canvas,
}

impl CanvasContext<'_> {
    /// Fills the whole canvas.
    pub fn fill(&mut self, color: Rgba) {
        self.canvas.pixels.fill(color);
    }

    /// Clears the canvas to transparent.
    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    /// Fills a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.canvas.width);
        let y_end = y.saturating_add(height).min(self.canvas.height);
        if x >= x_end || y >= y_end {
            return;
        }
        let stride = self.canvas.width as usize;

        for row in y..y_end {
            let start = row as usize * stride;
            self.canvas.pixels[start + x as usize..start + x_end as usize].fill(color);
        }
    }
}

/// Factory producing [`Canvas`] surfaces.
#[derive(Debug, Default)]
pub struct CanvasFactory {
    created: u64,
    released: u64,
}

impl CanvasFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            created: 0,
            released: 0,
        }
    }

    /// Canvases handed out so far.
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.created
    }

    /// Canvases returned so far.
    #[must_use]
    pub const fn released(&self) -> u64 {
        self.released
    }

    /// Canvases currently held by quadrants.
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.created - self.released
    }
}

impl SurfaceFactory for CanvasFactory {
    type Surface = Canvas;

    fn create_surface(&mut self, width: u32, height: u32) -> Canvas {
        self.created += 1;
        Canvas::new(width, height)
    }

    fn release_surface(&mut self, surface: Canvas) {
        self.released += 1;
        drop(surface);
    }
}
