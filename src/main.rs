#[macro_use]
extern crate log;

use disaster_map_server::{logger, server, AppConfig};


#[rocket::main]
async fn main() {
    logger::init();

    let config = AppConfig::from_env();

    if let Err(err) = server(config).launch().await {
        error!("Fail to launch server: {}", err);
    }
}
