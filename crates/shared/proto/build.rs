fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Shared envelope types must be compiled together with the services
    // that import them so cross-package paths resolve.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(
            &["proto/rpc.proto", "proto/user.proto", "proto/todo.proto"],
            &["proto/"],
        )?;

    Ok(())
}
