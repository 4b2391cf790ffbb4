//! Closed loop against an in-process controller.
//!
//! Runs the control server on a loopback port and drives it with a toy
//! discrete plant, one session per sample, printing the trajectory.
//!
//! Run with:
//!   cargo run --example plant-loop

use std::thread;

use poleplace::codec::{Quantizer, Request};
use poleplace::control::Controller;
use poleplace::session::{exchange, MemorySink, Server, ServerConfig};
use poleplace::transport::ListenerConfig;

const STEPS: usize = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig {
        listener: ListenerConfig::loopback(),
        max_sessions: Some(STEPS),
        ..ServerConfig::default()
    };
    let mut server = Server::bind(config, Controller::default(), MemorySink::new())?;
    let addr = server.local_addr();
    eprintln!("controller listening on {addr}");

    let handle = thread::spawn(move || {
        let summary = server.serve(|_| {})?;
        Ok::<_, poleplace::session::SessionError>((summary, server.into_sink()))
    });

    let quantizer = Quantizer::default();
    let (mut vo, mut v1) = (2.0f32, 0.0f32);
    for step in 0..STEPS {
        let request = Request::new(quantizer.quantize(vo), quantizer.quantize(v1));
        let response = exchange(addr, request)?;
        let vi = quantizer.dequantize(response.vi);
        println!("{step:2} vo={vo:+.4} v1={v1:+.4} vi={vi:+.4}");

        // First-order plant with one sample of memory.
        v1 = vo;
        vo = 0.9 * vo + 0.3 * vi;
    }

    let (summary, sink) = handle.join().map_err(|_| "server thread panicked")??;
    eprintln!(
        "served {} sessions, {} logged records",
        summary.completed,
        sink.records().len()
    );
    Ok(())
}
