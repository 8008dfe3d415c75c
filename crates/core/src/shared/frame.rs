use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::constants::RGBA_CHANNELS;

/// An owned RGBA frame: contiguous 4-channel bytes in row-major order.
///
/// Owned frames exist at the I/O boundary; the filter itself operates
/// on a borrowed [`FrameView`].
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * RGBA_CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Borrow the pixel data as a mutable view for in-place filtering.
    pub fn view_mut(&mut self) -> FrameView<'_> {
        FrameView::new(&mut self.data, self.width, self.height)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.height as usize,
            self.width as usize,
            RGBA_CHANNELS,
        );
        ArrayView3::from_shape(shape, &self.data).expect("frame data length must match dimensions")
    }
}

/// Borrowed mutable view of caller-owned RGBA pixels.
///
/// This is the host boundary: the caller allocates the buffer,
/// guarantees it holds `width * height * 4` bytes for the duration of
/// the borrow, and consumes the mutated contents afterwards. The
/// length invariant is debug-asserted, not validated at runtime;
/// channel semantics beyond that are the caller's contract.
pub struct FrameView<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameView<'a> {
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * RGBA_CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// True when the view holds no pixels; filters treat this as a no-op.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (self.height as usize, self.width as usize, RGBA_CHANNELS);
        ArrayView3::from_shape(shape, &*self.data)
            .expect("frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        let shape = (self.height as usize, self.width as usize, RGBA_CHANNELS);
        ArrayViewMut3::from_shape(shape, &mut *self.data)
            .expect("frame data length must match dimensions")
    }
}
