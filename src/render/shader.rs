pub(crate) const SHADER: &str = r#"
struct GlobalUniform {
    view_proj: mat4x4<f32>,
}

struct ObjectUniform {
    model: mat4x4<f32>,
    base_color: vec4<f32>,
    // xyz light position, w ambient intensity
    light: vec4<f32>,
    // xyz view position, w emissive clock
    view: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_pos = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    // model matrices carry translation only, so normals pass through
    out.normal = (object.model * vec4<f32>(input.normal, 0.0)).xyz;
    return out;
}

fn safe_normalize(v: vec3<f32>) -> vec3<f32> {
    let len = length(v);
    if (len < 1e-6) {
        return vec3<f32>(0.0);
    }
    return v / len;
}

@fragment
fn fs_emissive(input: VertexOutput) -> @location(0) vec4<f32> {
    let intensity = 0.8 + 0.2 * sin(object.view.w * 2.0);
    return vec4<f32>(object.base_color.rgb * intensity, 1.0);
}

@fragment
fn fs_plastic(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = safe_normalize(input.normal);
    let light_dir = safe_normalize(object.light.xyz - input.world_pos);
    let view_dir = safe_normalize(object.view.xyz - input.world_pos);

    let ambient = object.base_color.rgb * object.light.w;
    let diffuse = max(dot(normal, light_dir), 0.0) * object.base_color.rgb;
    let half_dir = safe_normalize(light_dir + view_dir);
    let specular = vec3<f32>(0.5) * pow(max(dot(normal, half_dir), 0.0), 32.0);
    return vec4<f32>(ambient + diffuse + specular, 1.0);
}

@fragment
fn fs_metallic(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = safe_normalize(input.normal);
    let light_dir = safe_normalize(object.light.xyz - input.world_pos);
    let view_dir = safe_normalize(object.view.xyz - input.world_pos);

    let ambient = object.base_color.rgb * object.light.w;
    let diffuse = max(dot(normal, light_dir), 0.0) * object.base_color.rgb;
    let reflect_dir = reflect(-light_dir, normal);
    let specular = object.base_color.rgb * pow(max(dot(view_dir, reflect_dir), 0.0), 64.0);
    return vec4<f32>(ambient + diffuse + specular, 1.0);
}
"#;
