//! GPU rendering of the molecule scene and the star background.
//!
//! One [`SceneRenderer`] draws three passes into the surface texture:
//! background stars (points, blended, no depth write), instanced spheres and
//! instanced cylinders. Sphere and cylinder instances come from a
//! [`PrimitiveInstances`] store that the scene writes through the
//! [`PrimitiveBackend`](crate::scene::PrimitiveBackend) seam; the renderer
//! re-uploads them only when the store reports a change.

pub mod instances;
pub mod mesh;
pub(crate) mod pipeline_util;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

pub use instances::{InstanceRaw, PrimitiveInstances};
use mesh::MeshData;

use crate::camera::core::CameraUniform;
use crate::error::MolstudioError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{
    ShaderComposer, PRIMITIVE_SHADER, STARS_SHADER,
};
use crate::options::Options;
use crate::scene::Starfield;
use crate::session::RenderSession;

/// Per-frame globals matching `SceneUniform` in `modules/scene.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    /// Molecule model matrix.
    pub model: [[f32; 4]; 4],
    /// Starfield model matrix.
    pub stars: [[f32; 4]; 4],
    /// Ambient light factor.
    pub ambient: f32,
    /// Star point alpha.
    pub star_opacity: f32,
    _pad: [f32; 2],
}

impl SceneUniform {
    /// Uniform for the given transforms.
    pub fn new(
        model: Mat4,
        stars: Mat4,
        ambient: f32,
        star_opacity: f32,
    ) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            stars: stars.to_cols_array_2d(),
            ambient,
            star_opacity,
            _pad: [0.0; 2],
        }
    }
}

/// One instanced mesh: unit geometry plus a growable instance storage
/// buffer.
struct PrimitivePass {
    label: &'static str,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: TypedBuffer<InstanceRaw>,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl PrimitivePass {
    fn new(
        device: &wgpu::Device,
        label: &'static str,
        mesh: &MeshData,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        // Storage bindings must not be empty.
        let instances = TypedBuffer::new_with_data(
            device,
            &format!("{label} instances"),
            &[InstanceRaw::zeroed()],
            wgpu::BufferUsages::STORAGE,
        );
        let bind_group =
            Self::create_bind_group(device, layout, &instances, label);
        Self {
            label,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            instances,
            bind_group,
            instance_count: 0,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &TypedBuffer<InstanceRaw>,
        label: &str,
    ) -> wgpu::BindGroup {
        pipeline_util::single_buffer_bind_group(
            device,
            layout,
            buffer.buffer(),
            &format!("{label} bind group"),
        )
    }

    fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        instances: &[InstanceRaw],
    ) {
        let zeroed = [InstanceRaw::zeroed()];
        let data = if instances.is_empty() {
            &zeroed[..]
        } else {
            instances
        };
        if self.instances.write(device, queue, data) {
            self.bind_group = Self::create_bind_group(
                device,
                layout,
                &self.instances,
                self.label,
            );
        }
        self.instance_count = instances.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

/// Star points uploaded once at construction.
struct StarPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    count: u32,
}

/// Draws a [`RenderSession`] backed by [`PrimitiveInstances`].
pub struct SceneRenderer {
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    storage_layout: wgpu::BindGroupLayout,
    primitive_pipeline: wgpu::RenderPipeline,
    spheres: PrimitivePass,
    cylinders: PrimitivePass,
    stars: Option<StarPass>,
    clear_color: wgpu::Color,
    ambient: f32,
    star_opacity: f32,
}

impl SceneRenderer {
    /// Build every pipeline and buffer for the configured surface.
    ///
    /// # Errors
    ///
    /// [`MolstudioError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        options: &Options,
        starfield: Option<&Starfield>,
    ) -> Result<Self, MolstudioError> {
        let device = &context.device;
        let mut composer = ShaderComposer::new()?;

        let camera_layout =
            pipeline_util::uniform_layout(device, "camera layout");
        let scene_layout =
            pipeline_util::uniform_layout(device, "scene layout");
        let storage_layout = create_storage_layout(device);

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera uniform"),
                contents: bytemuck::bytes_of(&CameraUniform::default()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline_util::single_buffer_bind_group(
            device,
            &camera_layout,
            &camera_buffer,
            "camera bind group",
        );

        let scene_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scene uniform"),
                contents: bytemuck::bytes_of(&SceneUniform::new(
                    Mat4::IDENTITY,
                    Mat4::IDENTITY,
                    options.scene.ambient,
                    options.starfield.opacity,
                )),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let scene_bind_group = pipeline_util::single_buffer_bind_group(
            device,
            &scene_layout,
            &scene_buffer,
            "scene bind group",
        );

        let primitive_pipeline = create_primitive_pipeline(
            context,
            &mut composer,
            &[&storage_layout, &camera_layout, &scene_layout],
        )?;
        let spheres = PrimitivePass::new(
            device,
            "sphere",
            &mesh::unit_sphere(),
            &storage_layout,
        );
        let cylinders = PrimitivePass::new(
            device,
            "cylinder",
            &mesh::unit_cylinder(),
            &storage_layout,
        );

        let stars = match starfield {
            Some(field) if !field.positions().is_empty() => {
                let pipeline = create_star_pipeline(
                    context,
                    &mut composer,
                    &[&camera_layout, &scene_layout],
                )?;
                let points: Vec<[f32; 3]> =
                    field.positions().iter().map(|p| p.to_array()).collect();
                let vertex_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("star vertices"),
                        contents: bytemuck::cast_slice(&points),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                );
                Some(StarPass {
                    pipeline,
                    vertex_buffer,
                    count: points.len() as u32,
                })
            }
            _ => None,
        };

        let [r, g, b] = options.scene.background;
        let (width, height) = context.size();
        Ok(Self {
            depth_view: create_depth_view(device, width, height),
            camera_buffer,
            camera_bind_group,
            scene_buffer,
            scene_bind_group,
            storage_layout,
            primitive_pipeline,
            spheres,
            cylinders,
            stars,
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
            ambient: options.scene.ambient,
            star_opacity: options.starfield.opacity,
        })
    }

    /// Recreate the depth buffer after the surface was resized.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.depth_view = create_depth_view(device, width, height);
        }
    }

    /// Upload per-frame state and instance changes, then draw one frame.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] if no frame could be acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        session: &mut RenderSession<PrimitiveInstances>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.upload(context, session);

        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("scene pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if let Some(stars) = &self.stars {
                pass.set_pipeline(&stars.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_bind_group(1, &self.scene_bind_group, &[]);
                pass.set_vertex_buffer(0, stars.vertex_buffer.slice(..));
                pass.draw(0..stars.count, 0..1);
            }

            pass.set_pipeline(&self.primitive_pipeline);
            pass.set_bind_group(1, &self.camera_bind_group, &[]);
            pass.set_bind_group(2, &self.scene_bind_group, &[]);
            self.spheres.draw(&mut pass);
            self.cylinders.draw(&mut pass);
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn upload(
        &mut self,
        context: &RenderContext,
        session: &mut RenderSession<PrimitiveInstances>,
    ) {
        let queue = &context.queue;
        let camera = session.camera().uniform();
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera),
        );

        let scene = SceneUniform::new(
            session.model_matrix(),
            session.star_matrix(),
            self.ambient,
            self.star_opacity,
        );
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));

        let store = session.scene_mut().backend_mut();
        if store.take_dirty() {
            self.spheres.write(
                &context.device,
                queue,
                &self.storage_layout,
                &store.sphere_instances(),
            );
            self.cylinders.write(
                &context.device,
                queue,
                &self.storage_layout,
                &store.cylinder_instances(),
            );
        }
    }
}

fn create_storage_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("instance storage layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: pipeline_util::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_primitive_pipeline(
    context: &RenderContext,
    composer: &mut ShaderComposer,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> Result<wgpu::RenderPipeline, MolstudioError> {
    let device = &context.device;
    let shader =
        composer.compose(device, "primitive shader", PRIMITIVE_SHADER)?;
    let layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("primitive pipeline layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });
    Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("primitive pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[mesh::mesh_vertex_buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &pipeline_util::surface_target(context.format(), None),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(pipeline_util::depth_stencil_state(true)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    }))
}

fn create_star_pipeline(
    context: &RenderContext,
    composer: &mut ShaderComposer,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> Result<wgpu::RenderPipeline, MolstudioError> {
    let device = &context.device;
    let shader = composer.compose(device, "star shader", STARS_SHADER)?;
    let layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star pipeline layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });
    Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("star pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &pipeline_util::surface_target(
                context.format(),
                Some(wgpu::BlendState::ALPHA_BLENDING),
            ),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::PointList,
            ..Default::default()
        },
        depth_stencil: Some(pipeline_util::depth_stencil_state(false)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    }))
}
