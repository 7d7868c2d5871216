//! Growable GPU buffers for per-instance data.
//!
//! wgpu buffers cannot be resized, so growth means allocating a new buffer.
//! Callers learn about it from [`TypedBuffer::write`] and rebuild any bind
//! group that pointed at the old one.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Smallest reallocation step, in items.
const MIN_GROWTH: usize = 64;

/// Capacity in items after growing from `current` to hold `needed`.
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.saturating_mul(2).max(current + MIN_GROWTH)
}

/// A GPU buffer of `T` that reallocates when a write outgrows it. Never
/// shrinks.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    label: String,
    usage: wgpu::BufferUsages,
    capacity: usize,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items (at least one).
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: allocate::<T>(device, label, capacity, usage),
            label: label.to_owned(),
            usage,
            capacity,
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Buffer holding exactly `data`.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });
        Self {
            buffer,
            label: label.to_owned(),
            usage,
            capacity: data.len(),
            count: data.len(),
            _marker: PhantomData,
        }
    }

    /// Replace the contents with `data`. Returns `true` when the buffer
    /// had to be reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let grew = data.len() > self.capacity;
        if grew {
            let capacity = grown_capacity(self.capacity, data.len());
            log::debug!(
                "{}: {} -> {capacity} items",
                self.label,
                self.capacity
            );
            self.buffer =
                allocate::<T>(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        grew
    }

    /// The current wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last write.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated room, in items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn allocate<T>(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * size_of::<T>()) as wgpu::BufferAddress,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::grown_capacity;

    #[test]
    fn growth_doubles_with_floor() {
        assert_eq!(grown_capacity(1, 2), 65);
        assert_eq!(grown_capacity(100, 120), 240);
    }
}
