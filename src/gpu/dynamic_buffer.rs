//! Growable GPU buffers.
//!
//! GPU buffers cannot be resized in place, so a write that exceeds the
//! current capacity allocates a larger buffer and reports the reallocation
//! so the caller can rebuild any bind group that referenced the old one.

use std::marker::PhantomData;

/// Smallest allocation. Also keeps storage bindings non-empty while the
/// mirrored data is empty.
pub const MIN_CAPACITY: usize = 64;

/// Capacity to allocate for `needed` bytes when `current` is too small:
/// 2x growth, and at least 1 KiB more than before.
#[must_use]
pub fn grown_capacity(needed: usize, current: usize) -> usize {
    (needed * 2).max(current + 1024)
}

/// A GPU buffer that grows 2x when written past its capacity and never
/// shrinks.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity. `COPY_DST` is always
    /// added to `usage`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Replace the whole content with `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups need
    /// recreation).
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = needed > self.capacity;
        if reallocated {
            self.capacity = grown_capacity(needed, self.capacity);
            self.buffer =
                allocate(device, &self.label, self.capacity, self.usage);
            log::debug!(
                "{}: reallocated to {} bytes",
                self.label,
                self.capacity
            );
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes of valid data.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.len
    }

}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: capacity as u64,
        usage,
        mapped_at_creation: false,
    })
}

/// Typed wrapper for [`DynamicBuffer`] that tracks item count rather than
/// byte length.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new(
                device,
                label,
                size_of::<T>() * capacity,
                usage,
            ),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Replace the whole content with `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups need
    /// recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// The underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Number of items written.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bytes of valid data.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.inner.byte_len()
    }
}
