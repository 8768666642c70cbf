//! The state tween sketch: a grid of soft circles blending between
//! precomputed color/scale states.

use std::ops::ControlFlow;

use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::frame::FrameLoop;
use super::program::{self, Program};
use crate::config::StateTweenConfig;
use crate::error::{Error, Result};
use crate::grid::GridSpec;
use crate::states::{StateGenerator, StateSequence};
use crate::tween::{TweenFrame, TweenState};

const VERTEX_HEAD: &str = r#"#version 300 es
precision highp float;

uniform float progress;  // 0..1 through the current tween
uniform float maxRadius; // a point is a 2r x 2r square

in vec2 point;
in float scaleA;
in float scaleB;
in vec3 colorA;
in vec3 colorB;

out vec3 rgb;
out float scale;
"#;

const VERTEX_MAIN: &str = r#"
void main() {
  float t = ease(progress);
  rgb = mix(colorA, colorB, t);
  scale = mix(scaleA, scaleB, t);

  gl_PointSize = maxRadius * 2.0 * scale;
  gl_Position = vec4(point, 0.0, 1.0);
}
"#;

const FRAGMENT: &str = r#"#version 300 es
precision highp float;

uniform float edgeInner;
uniform float edgeOuter;
uniform float opacity;
uniform float scaleRelative;

in vec3 rgb;
in float scale;

out vec4 fragColor;

void main() {
  float dist = length(gl_PointCoord * 2.0 - 1.0);
  float k = mix(1.0, scale, scaleRelative);
  float alpha = 1.0 - smoothstep(edgeInner * k, edgeOuter * k, dist);
  fragColor = vec4(rgb, alpha * opacity);
}
"#;

struct Attributes {
    point: u32,
    color_a: u32,
    color_b: u32,
    scale_a: u32,
    scale_b: u32,
}

struct Uniforms {
    progress: WebGlUniformLocation,
    max_radius: WebGlUniformLocation,
    edge_inner: WebGlUniformLocation,
    edge_outer: WebGlUniformLocation,
    opacity: WebGlUniformLocation,
    scale_relative: WebGlUniformLocation,
}

/// One animation state, resident on the GPU.
struct StateBuffers {
    colors: WebGlBuffer,
    scales: WebGlBuffer,
}

struct TweenRenderer {
    gl: GL,
    program: Program,
    attributes: Attributes,
    uniforms: Uniforms,
    vao: WebGlVertexArrayObject,
    states: Vec<StateBuffers>,
    count: i32,
    background: [f32; 4],
}

impl TweenRenderer {
    fn new(
        gl: GL,
        config: &StateTweenConfig,
        grid: &GridSpec,
        states: &StateSequence,
    ) -> Result<Self> {
        let vertex = format!("{VERTEX_HEAD}{}{VERTEX_MAIN}", config.easing.glsl());
        let program = Program::new(&gl, &vertex, FRAGMENT)?;
        let attributes = Attributes {
            point: program.attribute(&gl, "point")?,
            color_a: program.attribute(&gl, "colorA")?,
            color_b: program.attribute(&gl, "colorB")?,
            scale_a: program.attribute(&gl, "scaleA")?,
            scale_b: program.attribute(&gl, "scaleB")?,
        };
        let uniforms = Uniforms {
            progress: program.uniform(&gl, "progress")?,
            max_radius: program.uniform(&gl, "maxRadius")?,
            edge_inner: program.uniform(&gl, "edgeInner")?,
            edge_outer: program.uniform(&gl, "edgeOuter")?,
            opacity: program.uniform(&gl, "opacity")?,
            scale_relative: program.uniform(&gl, "scaleRelative")?,
        };

        let vao = gl
            .create_vertex_array()
            .ok_or(Error::ResourceCreation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        let points = program::static_buffer(&gl, &grid.points())?;
        program::bind_attribute(&gl, &points, attributes.point, 2);

        let states = states
            .states()
            .iter()
            .map(|state| {
                Ok(StateBuffers {
                    colors: program::static_buffer(&gl, &state.colors)?,
                    scales: program::static_buffer(&gl, &state.scales)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        gl.bind_vertex_array(None);

        program.bind(&gl);
        gl.uniform1f(Some(&uniforms.max_radius), grid.max_radius());
        let (inner, outer, opacity, scale_relative) = config.edge.uniforms();
        gl.uniform1f(Some(&uniforms.edge_inner), inner);
        gl.uniform1f(Some(&uniforms.edge_outer), outer);
        gl.uniform1f(Some(&uniforms.opacity), opacity);
        gl.uniform1f(Some(&uniforms.scale_relative), scale_relative);
        program::apply_blend(&gl, config.blend);

        Ok(Self {
            gl,
            program,
            attributes,
            uniforms,
            vao,
            states,
            count: grid.count() as i32,
            background: config.background,
        })
    }

    fn draw(&self, frame: TweenFrame) {
        let gl = &self.gl;
        let current = &self.states[frame.current];
        let next = &self.states[frame.next];

        program::clear(gl, self.background);
        self.program.bind(gl);
        gl.bind_vertex_array(Some(&self.vao));
        program::bind_attribute(gl, &current.colors, self.attributes.color_a, 3);
        program::bind_attribute(gl, &next.colors, self.attributes.color_b, 3);
        program::bind_attribute(gl, &current.scales, self.attributes.scale_a, 1);
        program::bind_attribute(gl, &next.scales, self.attributes.scale_b, 1);
        gl.uniform1f(Some(&self.uniforms.progress), frame.progress);
        gl.draw_arrays(GL::POINTS, 0, self.count);
        gl.bind_vertex_array(None);
    }
}

/// Builds the grid and every state up front, uploads them, and starts the
/// frame loop.
pub fn start(canvas: HtmlCanvasElement, config: &StateTweenConfig) -> Result<FrameLoop> {
    let (gl, width, height) = program::context(&canvas)?;
    let grid = GridSpec::fit(width, height, config.cols)?;
    let palette = config.palette.build()?;
    let generator =
        StateGenerator::new(palette, config.min_scale, config.max_scale, config.source)?;
    let states = StateSequence::build(&generator, grid.count(), config.num_states)?;
    let frames_per_cycle = config.frames_per_cycle()?;
    let mut tween = TweenState::new(frames_per_cycle, states.len())?;
    log::info!(
        "grid {}x{} ({} points), {} states, {} frames per tween",
        grid.cols,
        grid.rows,
        grid.count(),
        states.len(),
        frames_per_cycle
    );

    let renderer = TweenRenderer::new(gl, config, &grid, &states)?;
    let clock = config.clock;
    let fps = config.fps;
    let frame_loop = FrameLoop::start(move |info| {
        let tick = clock.tick(info.tick, info.elapsed_secs, fps);
        renderer.draw(tween.advance(tick));
        ControlFlow::Continue(())
    })?;
    Ok(frame_loop)
}
