//! Shader compilation and the small amount of buffer plumbing the sketches
//! share.

use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};
use wasm_bindgen::JsCast;

use crate::config::BlendMode;
use crate::error::{Error, Result};

/// Gets a WebGL2 context and sizes the canvas to the window.
pub fn context(canvas: &HtmlCanvasElement) -> Result<(GL, f32, f32)> {
    let window = web_sys::window().ok_or(Error::ResourceCreation("window"))?;
    let width = window.inner_width()?.as_f64().unwrap_or(canvas.width() as f64);
    let height = window.inner_height()?.as_f64().unwrap_or(canvas.height() as f64);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(Error::ContextUnavailable)?
        .dyn_into()
        .map_err(|_| Error::ContextUnavailable)?;
    gl.viewport(0, 0, width as i32, height as i32);
    Ok((gl, width as f32, height as f32))
}

/// A linked program. Attribute and uniform lookups fail if the linked
/// program does not expose the name, so a sketch can resolve all of its
/// locations once at construction.
pub struct Program {
    program: WebGlProgram,
}

impl Program {
    pub fn new(gl: &GL, vertex: &str, fragment: &str) -> Result<Self> {
        let vs = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
        let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;
        let program = link_program(gl, &vs, &fs);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));
        Ok(Self { program: program? })
    }

    pub fn attribute(&self, gl: &GL, name: &'static str) -> Result<u32> {
        let location = gl.get_attrib_location(&self.program, name);
        u32::try_from(location).map_err(|_| Error::MissingAttribute(name))
    }

    pub fn uniform(&self, gl: &GL, name: &'static str) -> Result<WebGlUniformLocation> {
        gl.get_uniform_location(&self.program, name)
            .ok_or(Error::MissingUniform(name))
    }

    pub fn bind(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or(Error::ResourceCreation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_shader(Some(&shader));
        let stage = if shader_type == GL::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        };
        return Err(Error::ShaderCompile { stage, log });
    }
    Ok(shader)
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or(Error::ResourceCreation("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_program(Some(&program));
        return Err(Error::ProgramLink(log));
    }
    Ok(program)
}

/// Uploads `data` into a new `STATIC_DRAW` array buffer.
pub fn static_buffer(gl: &GL, data: &[f32]) -> Result<WebGlBuffer> {
    let buffer = gl.create_buffer().ok_or(Error::ResourceCreation("buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    Ok(buffer)
}

/// Replaces the contents of an existing array buffer.
pub fn refill_buffer(gl: &GL, buffer: &WebGlBuffer, data: &[f32]) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
}

/// Points attribute `location` at tightly packed `size`-float elements of
/// `buffer`. The caller must have the target VAO bound.
pub fn bind_attribute(gl: &GL, buffer: &WebGlBuffer, location: u32, size: i32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
}

pub fn apply_blend(gl: &GL, mode: BlendMode) {
    gl.disable(GL::DEPTH_TEST);
    gl.enable(GL::BLEND);
    gl.blend_equation(GL::FUNC_ADD);
    match mode {
        BlendMode::Additive => {
            gl.blend_func_separate(GL::SRC_ALPHA, GL::ONE, GL::SRC_COLOR, GL::ONE)
        }
        BlendMode::Alpha => {
            gl.blend_func_separate(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA, GL::ONE, GL::ONE)
        }
    }
}

pub fn clear(gl: &GL, [r, g, b, a]: [f32; 4]) {
    gl.clear_color(r, g, b, a);
    gl.clear(GL::COLOR_BUFFER_BIT);
}
