use datasetctl::run;

fn main() {
    let result = run();
    let error = match result {
        Err(error) => error,
        Ok(0) => return,
        Ok(num) => std::process::exit(num),
    };

    // Distinguish the failure classes for scripts invoking datasetctl.
    if let Some(error) = error.downcast_ref::<datasetctl::Conflict>() {
        eprintln!("{}", error);
        std::process::exit(2);
    }
    if let Some(error) = error.downcast_ref::<datasetctl::DatasetNotFound>() {
        eprintln!("{}", error);
        std::process::exit(3);
    }
    if error.downcast_ref::<datasetctl::ServerError>().is_some() {
        eprintln!("{:?}", error);
        std::process::exit(3);
    }
    if let Some(transport) = error.downcast_ref::<datasetctl::TransportError>() {
        eprintln!("{:?}", error);
        eprintln!(
            "Check that the executor '{}' is reachable and the discovery configuration is correct",
            transport.target,
        );
        std::process::exit(4);
    }

    // Print the error in detailed format for all other cases.
    eprintln!("{:?}", error);
    std::process::exit(1);
}
