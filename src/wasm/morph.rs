//! The layout morph sketch: a large point cloud easing from one layout to
//! the next, each point starting a little later than the one before it.

use std::ops::ControlFlow;

use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::frame::FrameLoop;
use super::program::{self, Program};
use crate::config::{BlendMode, LayoutMorphConfig};
use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::layout::LayoutMorph;
use crate::tween::TimedTween;

const VERTEX_HEAD: &str = r#"#version 300 es
precision highp float;

in vec2 positionStart;
in vec2 positionEnd;
in vec3 colorStart;
in vec3 colorEnd;

out vec3 color;

uniform float pointWidth;
uniform float stageWidth;
uniform float stageHeight;
uniform float elapsed;      // ms since this morph started
uniform float duration;     // ms
uniform float delayByIndex; // ms
"#;

const VERTEX_MAIN: &str = r#"
void main() {
  gl_PointSize = pointWidth;

  float delay = delayByIndex * float(gl_VertexID);
  float t;
  if (duration == 0.0) {
    t = 1.0;
  } else if (elapsed < delay) {
    t = 0.0;
  } else {
    t = min(ease(min((elapsed - delay) / duration, 1.0)), 1.0);
  }

  vec2 position = mix(positionStart, positionEnd, t);
  color = mix(colorStart, colorEnd, t);

  // pixel space has y pointing down
  gl_Position = vec4(
    2.0 * (position.x / stageWidth - 0.5),
    -2.0 * (position.y / stageHeight - 0.5),
    0.0,
    1.0);
}
"#;

const FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec3 color;
out vec4 fragColor;

void main() {
  fragColor = vec4(color, 1.0);
}
"#;

struct Uniforms {
    point_width: WebGlUniformLocation,
    stage_width: WebGlUniformLocation,
    stage_height: WebGlUniformLocation,
    elapsed: WebGlUniformLocation,
    duration: WebGlUniformLocation,
    delay_by_index: WebGlUniformLocation,
}

struct Endpoints {
    start_positions: WebGlBuffer,
    end_positions: WebGlBuffer,
    start_colors: WebGlBuffer,
    end_colors: WebGlBuffer,
}

struct MorphRenderer {
    gl: GL,
    program: Program,
    uniforms: Uniforms,
    vao: WebGlVertexArrayObject,
    endpoints: Endpoints,
    count: i32,
    background: [f32; 4],
}

impl MorphRenderer {
    fn new(
        gl: GL,
        config: &LayoutMorphConfig,
        morph: &LayoutMorph,
        timing: TimedTween,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        let vertex = format!("{VERTEX_HEAD}{}{VERTEX_MAIN}", Easing::CubicInOut.glsl());
        let program = Program::new(&gl, &vertex, FRAGMENT)?;
        let uniforms = Uniforms {
            point_width: program.uniform(&gl, "pointWidth")?,
            stage_width: program.uniform(&gl, "stageWidth")?,
            stage_height: program.uniform(&gl, "stageHeight")?,
            elapsed: program.uniform(&gl, "elapsed")?,
            duration: program.uniform(&gl, "duration")?,
            delay_by_index: program.uniform(&gl, "delayByIndex")?,
        };

        let vao = gl
            .create_vertex_array()
            .ok_or(Error::ResourceCreation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        let endpoints = Endpoints {
            start_positions: program::static_buffer(&gl, &morph.start_positions.concat())?,
            end_positions: program::static_buffer(&gl, &morph.end_positions.concat())?,
            start_colors: program::static_buffer(&gl, &morph.start_colors.concat())?,
            end_colors: program::static_buffer(&gl, &morph.end_colors.concat())?,
        };
        program::bind_attribute(
            &gl,
            &endpoints.start_positions,
            program.attribute(&gl, "positionStart")?,
            2,
        );
        program::bind_attribute(
            &gl,
            &endpoints.end_positions,
            program.attribute(&gl, "positionEnd")?,
            2,
        );
        program::bind_attribute(
            &gl,
            &endpoints.start_colors,
            program.attribute(&gl, "colorStart")?,
            3,
        );
        program::bind_attribute(
            &gl,
            &endpoints.end_colors,
            program.attribute(&gl, "colorEnd")?,
            3,
        );
        gl.bind_vertex_array(None);

        program.bind(&gl);
        gl.uniform1f(Some(&uniforms.point_width), config.point_width);
        gl.uniform1f(Some(&uniforms.stage_width), width);
        gl.uniform1f(Some(&uniforms.stage_height), height);
        gl.uniform1f(Some(&uniforms.duration), timing.duration_ms);
        gl.uniform1f(Some(&uniforms.delay_by_index), timing.delay_by_index);
        program::apply_blend(&gl, BlendMode::Alpha);

        Ok(Self {
            gl,
            program,
            uniforms,
            vao,
            endpoints,
            count: morph.count() as i32,
            background: config.background,
        })
    }

    /// Re-uploads endpoints after the morph moved on to a new layout.
    fn upload(&self, morph: &LayoutMorph) {
        let gl = &self.gl;
        let e = &self.endpoints;
        program::refill_buffer(gl, &e.start_positions, &morph.start_positions.concat());
        program::refill_buffer(gl, &e.end_positions, &morph.end_positions.concat());
        program::refill_buffer(gl, &e.start_colors, &morph.start_colors.concat());
        program::refill_buffer(gl, &e.end_colors, &morph.end_colors.concat());
    }

    fn draw(&self, elapsed_ms: f32) {
        let gl = &self.gl;
        program::clear(gl, self.background);
        self.program.bind(gl);
        gl.bind_vertex_array(Some(&self.vao));
        gl.uniform1f(Some(&self.uniforms.elapsed), elapsed_ms);
        gl.draw_arrays(GL::POINTS, 0, self.count);
        gl.bind_vertex_array(None);
    }
}

pub fn start(canvas: HtmlCanvasElement, config: &LayoutMorphConfig) -> Result<FrameLoop> {
    let (gl, width, height) = program::context(&canvas)?;
    let mut morph = LayoutMorph::new(
        config.num_points,
        config.spacing(),
        width,
        height,
        config.first_layout,
        config.first_ramp,
    )?;
    let timing = TimedTween::staggered(config.duration_ms, config.total_delay_ms, morph.count());
    log::info!(
        "morphing {} points into `{}`, {}ms per layout",
        morph.count(),
        morph.layout(),
        timing.max_duration(morph.count())
    );

    let renderer = MorphRenderer::new(gl, config, &morph, timing, width, height)?;
    let mut started: Option<f64> = None;
    let frame_loop = FrameLoop::start(move |info| {
        let start = *started.get_or_insert(info.elapsed_secs);
        let elapsed_ms = ((info.elapsed_secs - start) * 1000.0) as f32;
        renderer.draw(elapsed_ms);

        if timing.is_done(elapsed_ms, morph.count()) {
            morph.advance();
            log::info!("moving on to `{}` with {}", morph.layout(), morph.ramp());
            renderer.upload(&morph);
            started = None;
        }
        ControlFlow::Continue(())
    })?;
    Ok(frame_loop)
}
