//! Host-side helper: `cargo run [-- <sketch> [port]]` builds the wasm
//! package into `static/pkg` and serves `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    use tween_viz::config::Preset;

    let mut args = env::args().skip(1);
    let preset = match args.next().map(|name| name.parse::<Preset>()) {
        Some(Ok(preset)) => preset,
        Some(Err(_)) => {
            eprintln!("unknown sketch; pick one of pulse-grid, pubu-grid, flicker-grid, layout-morph");
            std::process::exit(2);
        }
        None => Preset::default(),
    };
    let port = args.next().unwrap_or_else(|| "8000".to_string());

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving whatever is already in static/pkg.");
        }
    }

    let mut server = match Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(server) => server,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            std::process::exit(1);
        }
    };
    println!("Serving `{preset}` at http://127.0.0.1:{port}/?sketch={preset}");

    loop {
        if let Ok(Some(status)) = server.try_wait() {
            eprintln!("http server exited with {status}");
            std::process::exit(1);
        }
        thread::sleep(Duration::from_secs(5));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
