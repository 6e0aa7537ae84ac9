use folio_core::constants::{HERO_RADIUS, HERO_SUBDIVISIONS};
use folio_core::geometry::{self, Mesh};
use folio_core::Primitive;
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    pub(crate) const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) fn interleave(positions: &[Vec3], normals: &[Vec3]) -> Vec<Vertex> {
    positions
        .iter()
        .zip(normals)
        .map(|(p, n)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh, dynamic: bool) -> Self {
        let vertices = interleave(&mesh.positions, &mesh.normals);
        let mut usage = wgpu::BufferUsages::VERTEX;
        if dynamic {
            usage |= wgpu::BufferUsages::COPY_DST;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// One GPU mesh per [`Primitive`]. The hero's vertex buffer is rewritten
/// every frame from the deformed positions.
pub(crate) struct MeshSet {
    pub(crate) hero: GpuMesh,
    cuboid: GpuMesh,
    torus: GpuMesh,
    capsule: GpuMesh,
    halo: GpuMesh,
}

impl MeshSet {
    pub(crate) fn new(device: &wgpu::Device, hero: &Mesh) -> Self {
        Self {
            hero: GpuMesh::upload(device, "hero", hero, true),
            cuboid: GpuMesh::upload(device, "cuboid", &geometry::cuboid(), false),
            torus: GpuMesh::upload(device, "ribbon_torus", &geometry::torus(1.9, 0.06, 12, 96), false),
            capsule: GpuMesh::upload(device, "capsule", &geometry::capsule(0.09, 0.42, 6, 12), false),
            halo: GpuMesh::upload(device, "halo", &geometry::torus(2.4, 0.012, 6, 128), false),
        }
    }

    pub(crate) fn get(&self, primitive: Primitive) -> &GpuMesh {
        match primitive {
            Primitive::Hero => &self.hero,
            Primitive::Box | Primitive::Panel => &self.cuboid,
            Primitive::RibbonTorus => &self.torus,
            Primitive::Capsule => &self.capsule,
            Primitive::Halo => &self.halo,
        }
    }
}

pub(crate) fn hero_mesh() -> Mesh {
    geometry::icosphere(HERO_RADIUS, HERO_SUBDIVISIONS)
}
