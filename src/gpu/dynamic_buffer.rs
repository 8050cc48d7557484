//! GPU buffers for per-frame instance uploads that reallocate when an
//! upload no longer fits.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Capacity, in items, after growing to hold `needed` items.
///
/// Doubles the request, and grows by at least 64 items over `current`.
fn grown_capacity(needed: usize, current: usize) -> usize {
    needed.saturating_mul(2).max(current + 64)
}

/// A GPU buffer of `T` that reallocates when an upload exceeds it.
///
/// Never shrinks. A reallocation replaces the `wgpu::Buffer`, so bind groups
/// referencing it must be rebuilt; [`GrowableBuffer::write`] reports when.
pub struct GrowableBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _items: PhantomData<T>,
}

impl<T: bytemuck::Pod> GrowableBuffer<T> {
    /// Buffer holding `data`.
    ///
    /// An empty slice still allocates one zeroed item, since wgpu rejects
    /// zero-sized storage bindings.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let zeroed = [T::zeroed()];
        let initial = if data.is_empty() { &zeroed[..] } else { data };

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(initial),
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity: initial.len(),
            usage,
            label: label.to_owned(),
            _items: PhantomData,
        }
    }

    /// Upload `data` from offset zero.
    ///
    /// Returns `true` when the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let grew = data.len() > self.capacity;
        if grew {
            let capacity = grown_capacity(data.len(), self.capacity);
            log::debug!(
                "{}: {} -> {capacity} items",
                self.label,
                self.capacity
            );
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (capacity * size_of::<T>()) as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = capacity;
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        grew
    }

    /// The current allocation.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
