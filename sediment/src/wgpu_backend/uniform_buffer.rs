use std::marker::PhantomData;
use std::{any, mem, slice};

use bytemuck::Pod;

/// Uniform buffer holding a single parameter block; each write goes straight
/// to the queue.
#[derive(Debug)]
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    _ty: PhantomData<T>,
}

impl<T> UniformBuffer<T>
where
    T: Pod,
{
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        // Rounded up to a multiple of 32 bytes
        let size = (mem::size_of::<T>() + 31) & !31;

        log::debug!(
            "Allocating params `{label}`; ty={}, size={size}",
            any::type_name::<T>(),
        );

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
            size: size as _,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            _ty: PhantomData,
        }
    }

    /// Schedules `value` to be uploaded before the next submission.
    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(slice::from_ref(value)),
        );
    }

    pub fn as_entire_binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}
