//! GPU mirror of the trail store.
//!
//! Two read-only storage buffers at fixed bindings of one bind group: the
//! flat point array and the per-trail metadata pairs. Any structural change
//! to the store triggers a full rewrite of both; the mirror never diffs.

use super::dynamic_buffer::TypedBuffer;
use super::pipeline_helpers::storage_buffer_ro;
use crate::trail::{Point, TrailMetadata, TrailStore};

/// Binding slot of the point buffer.
pub const POINTS_BINDING: u32 = 0;
/// Binding slot of the metadata buffer.
pub const METADATA_BINDING: u32 = 1;

/// Initial capacities, sized for the default trail.
const INITIAL_POINTS: usize = 8192;
const INITIAL_TRAILS: usize = 16;

/// One instanced draw: which trail, and how many quad segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailDraw {
    /// Index of the trail, selecting its metadata pair in the shader.
    pub trail_index: u32,
    /// Instance count, `point_count - 1`.
    pub segments: u32,
}

/// Draw list for the trails of `store`, in store order, skipping trails
/// without a segment.
#[must_use]
pub fn draw_list(store: &TrailStore) -> Vec<TrailDraw> {
    store
        .trails()
        .iter()
        .enumerate()
        .filter_map(|(i, trail)| {
            let segments = trail.segment_count();
            (segments > 0).then_some(TrailDraw {
                trail_index: i as u32,
                segments,
            })
        })
        .collect()
}

/// The point buffer's byte content for `store`.
#[must_use]
pub fn encode_points(store: &TrailStore) -> &[u8] {
    bytemuck::cast_slice(store.points())
}

/// The metadata buffer's byte content for `store`.
#[must_use]
pub fn encode_metadata(store: &TrailStore) -> Vec<u8> {
    bytemuck::cast_slice(&store.metadata()).to_vec()
}

/// Storage buffers mirroring a [`TrailStore`], plus the bind group exposing
/// them to the trail pass.
pub struct TrailBuffers {
    points: TypedBuffer<Point>,
    metadata: TypedBuffer<TrailMetadata>,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    draws: Vec<TrailDraw>,
    synced_revision: Option<u64>,
}

impl TrailBuffers {
    /// Empty mirror. Nothing is drawn until the first [`sync`](Self::sync).
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let usage = wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC;
        let points = TypedBuffer::with_capacity(
            device,
            "Trail Points Buffer",
            INITIAL_POINTS,
            usage,
        );
        let metadata = TypedBuffer::with_capacity(
            device,
            "Trail Metadata Buffer",
            INITIAL_TRAILS,
            usage,
        );

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Trail Storage Layout"),
                entries: &[
                    storage_buffer_ro(POINTS_BINDING),
                    storage_buffer_ro(METADATA_BINDING),
                ],
            });
        let bind_group =
            create_bind_group(device, &layout, &points, &metadata);

        Self {
            points,
            metadata,
            layout,
            bind_group,
            draws: Vec::new(),
            synced_revision: None,
        }
    }

    /// Rewrite both buffers from `store` if it changed since the last sync.
    ///
    /// Returns `true` if an upload happened.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        store: &TrailStore,
    ) -> bool {
        if self.is_current(store) {
            return false;
        }

        let metadata = store.metadata();
        let grew_points = self.points.write(device, queue, store.points());
        let grew_metadata = self.metadata.write(device, queue, &metadata);
        if grew_points || grew_metadata {
            self.bind_group = create_bind_group(
                device,
                &self.layout,
                &self.points,
                &self.metadata,
            );
        }

        self.draws = draw_list(store);
        self.synced_revision = Some(store.revision());

        log::debug!(
            "trail mirror synced: {} points ({} bytes), {} trails ({} bytes)",
            self.points.count(),
            self.points.byte_len(),
            self.metadata.count(),
            self.metadata.byte_len(),
        );
        true
    }

    /// Whether the mirror matches the store's current revision.
    #[must_use]
    pub fn is_current(&self, store: &TrailStore) -> bool {
        self.synced_revision == Some(store.revision())
    }

    /// Layout of the storage bind group.
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group exposing both buffers at their fixed bindings.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Draws for the uploaded trails. Empty until the first sync.
    #[must_use]
    pub fn draws(&self) -> &[TrailDraw] {
        &self.draws
    }

    /// Number of points uploaded.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.count()
    }

    /// Number of trails uploaded.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.metadata.count()
    }

    /// The point storage buffer.
    #[must_use]
    pub fn points_buffer(&self) -> &wgpu::Buffer {
        self.points.buffer()
    }

    /// The metadata storage buffer.
    #[must_use]
    pub fn metadata_buffer(&self) -> &wgpu::Buffer {
        self.metadata.buffer()
    }

    /// Bytes of valid point data.
    #[must_use]
    pub fn points_len(&self) -> usize {
        self.points.byte_len()
    }

    /// Bytes of valid metadata.
    #[must_use]
    pub fn metadata_len(&self) -> usize {
        self.metadata.byte_len()
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    points: &TypedBuffer<Point>,
    metadata: &TypedBuffer<TrailMetadata>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Trail Storage Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: POINTS_BINDING,
                resource: points.buffer().as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: METADATA_BINDING,
                resource: metadata.buffer().as_entire_binding(),
            },
        ],
    })
}

/// Copy the first `len` bytes of `buffer` back to the CPU, blocking until
/// the GPU is done. `buffer` needs `COPY_SRC` usage.
#[must_use]
pub fn read_buffer(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    len: usize,
) -> Option<Vec<u8>> {
    if len == 0 {
        return Some(Vec::new());
    }
    let size = (len as u64).next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT);
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Staging Buffer"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });
    encoder.copy_buffer_to_buffer(buffer, 0, &staging, 0, size);
    let _ = queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (sender, receiver) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    let _ = device.poll(wgpu::PollType::Wait);

    let Ok(Ok(())) = receiver.recv() else {
        return None;
    };
    let bytes = slice.get_mapped_range()[..len].to_vec();
    staging.unmap();
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::render_context::RenderContext;
    use crate::trail::StyleRanges;

    fn store() -> TrailStore {
        TrailStore::with_seed(StyleRanges::default(), 5)
    }

    fn context() -> Option<RenderContext> {
        pollster::block_on(RenderContext::headless(64, 64)).ok()
    }

    #[test]
    fn draw_list_follows_store_order() {
        let mut store = store();
        let _ = store.add_trail(5000, 5.0, 0.08);
        let _ = store.add_trail(3000, 8.0, 0.05);
        assert_eq!(
            draw_list(&store),
            vec![
                TrailDraw {
                    trail_index: 0,
                    segments: 4999
                },
                TrailDraw {
                    trail_index: 1,
                    segments: 2999
                },
            ]
        );
    }

    #[test]
    fn encoding_sizes() {
        let mut store = store();
        let _ = store.add_trail(100, 2.0, 0.1);
        let _ = store.add_trail(50, 2.0, 0.1);
        assert_eq!(encode_points(&store).len(), 150 * 16);
        assert_eq!(encode_metadata(&store).len(), 2 * 32);
    }

    #[test]
    fn metadata_encoding_is_color_then_params() {
        let mut store = store();
        let _ = store.add_trail(300, 4.0, 0.25);
        let bytes = encode_metadata(&store);
        let floats: &[f32] = bytemuck::cast_slice(&bytes);
        let trail = &store.trails()[0];
        assert_eq!(&floats[..4], &trail.color);
        assert_eq!(
            &floats[4..],
            &[0.25, trail.glow_intensity, 0.0, 300.0]
        );
    }

    #[test]
    fn mirror_matches_store_after_add_and_clear() {
        let Some(ctx) = context() else {
            return;
        };
        let mut store = store();
        let mut mirror = TrailBuffers::new(&ctx.device);
        assert!(mirror.draws().is_empty());

        let _ = store.add_trail(5000, 5.0, 0.08);
        let _ = store.add_trail(3000, 8.0, 0.05);
        assert!(mirror.sync(&ctx.device, &ctx.queue, &store));
        assert!(!mirror.sync(&ctx.device, &ctx.queue, &store));

        let points = read_buffer(
            &ctx.device,
            &ctx.queue,
            mirror.points_buffer(),
            mirror.points_len(),
        );
        assert_eq!(points.as_deref(), Some(encode_points(&store)));
        let metadata = read_buffer(
            &ctx.device,
            &ctx.queue,
            mirror.metadata_buffer(),
            mirror.metadata_len(),
        );
        assert_eq!(metadata, Some(encode_metadata(&store)));
        assert_eq!(mirror.trail_count(), 2);
        assert_eq!(mirror.point_count(), 8000);

        store.clear_all();
        assert!(mirror.sync(&ctx.device, &ctx.queue, &store));
        assert_eq!(mirror.point_count(), 0);
        assert_eq!(mirror.trail_count(), 0);
        assert_eq!(mirror.points_len(), 0);
        assert!(mirror.draws().is_empty());
    }

    #[test]
    fn mirror_survives_growth() {
        let Some(ctx) = context() else {
            return;
        };
        let mut store = store();
        let mut mirror = TrailBuffers::new(&ctx.device);
        for _ in 0..20 {
            let _ = store.add_trail(20_000, 10.0, 0.1);
        }
        assert!(mirror.sync(&ctx.device, &ctx.queue, &store));
        let points = read_buffer(
            &ctx.device,
            &ctx.queue,
            mirror.points_buffer(),
            mirror.points_len(),
        );
        assert_eq!(points.as_deref(), Some(encode_points(&store)));
        assert_eq!(mirror.draws().len(), 20);
    }
}
