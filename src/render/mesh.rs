use folio_core::SceneGraph;
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    base_color: [f32; 4],
}

/// One uploaded primitive with the material it draws with.
pub(crate) struct GpuPrimitive {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) material: usize,
    pub(crate) double_sided: bool,
}

/// Everything needed to draw the loaded scene.
pub(crate) struct GpuScene {
    pub(crate) primitives: Vec<GpuPrimitive>,
    pub(crate) material_bind_groups: Vec<wgpu::BindGroup>,
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * size.width),
            rows_per_image: Some(size.height),
        },
        size,
    );
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

impl GpuScene {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material_bgl: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        graph: &SceneGraph,
    ) -> Self {
        let white = upload_rgba8(device, queue, "white_tex", 1, 1, &[255, 255, 255, 255]);
        let texture_views: Vec<Option<wgpu::TextureView>> = graph
            .textures()
            .iter()
            .map(|t| {
                let expected = (t.width as usize) * (t.height as usize) * 4;
                if t.rgba.len() != expected {
                    log::warn!(
                        "[gpu] texture {}x{} has {} bytes, expected {}",
                        t.width,
                        t.height,
                        t.rgba.len(),
                        expected
                    );
                    return None;
                }
                Some(upload_rgba8(device, queue, "base_color_tex", t.width, t.height, &t.rgba))
            })
            .collect();

        let material_bind_groups = graph
            .materials()
            .iter()
            .map(|m| {
                let view = m
                    .base_color_texture
                    .and_then(|i| texture_views.get(i))
                    .and_then(Option::as_ref)
                    .unwrap_or(&white);
                let uniforms = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("material_uniforms"),
                    contents: bytemuck::bytes_of(&MaterialUniforms {
                        base_color: m.base_color_factor,
                    }),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("material_bg"),
                    layout: material_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: uniforms.as_entire_binding(),
                        },
                    ],
                })
            })
            .collect();

        let primitives = graph
            .primitives()
            .iter()
            .filter(|p| !p.indices.is_empty())
            .map(|p| GpuPrimitive {
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("primitive_vb"),
                    contents: bytemuck::cast_slice(&p.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("primitive_ib"),
                    contents: bytemuck::cast_slice(&p.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: p.indices.len() as u32,
                material: p.material,
                double_sided: graph.material_of(p).double_sided,
            })
            .collect();

        Self {
            primitives,
            material_bind_groups,
        }
    }
}
