use std::{env, process::Command};

fn setup_hdf5() {
    if env::var("HDF5_DIR").is_ok() {
        return;
    }

    let output = match Command::new("h5cc").arg("-showconfig").output() {
        Ok(output) => output,
        Err(err) => {
            println!(
                "cargo:warning=Could not run h5cc to locate HDF5 ({}); \
                 set HDF5_DIR if the build fails",
                err
            );
            return;
        }
    };
    let config_text = String::from_utf8_lossy(&output.stdout).into_owned();

    for line in config_text.lines() {
        if let Some(install_path) = line.trim_start().strip_prefix("Installation point:") {
            println!("cargo:rustc-env=HDF5_DIR={}", install_path.trim());
            return;
        }
    }
}

fn main() {
    if env::var_os("CARGO_FEATURE_HDF5").is_some() {
        setup_hdf5();
    }
}
