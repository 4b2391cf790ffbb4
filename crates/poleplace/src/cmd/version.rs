use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("poleplace {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: poleplace");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("POLEPLACE_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("POLEPLACE_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!(
        "interface_binding: {}",
        cfg!(any(target_os = "linux", target_os = "android"))
    );
    println!(
        "defaults: port={} backlog={} interface={} q_gain={}",
        poleplace_transport::DEFAULT_PORT,
        poleplace_transport::DEFAULT_BACKLOG,
        poleplace_transport::DEFAULT_INTERFACE,
        poleplace_codec::DEFAULT_Q_GAIN
    );

    Ok(SUCCESS)
}
