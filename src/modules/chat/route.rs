use actix_web::web::{scope, JsonConfig, PathConfig, ServiceConfig};

use crate::{api::error, modules::chat::handle::*};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(
        JsonConfig::default()
            .error_handler(|err, _req| error::Error::bad_request(err.to_string()).into()),
    )
    .app_data(
        PathConfig::default()
            .error_handler(|err, _req| error::Error::bad_request(err.to_string()).into()),
    )
    .service(send_message)
    .service(scope("/users").service(list_received).service(clear_user_messages))
    .service(scope("/conversations").service(get_conversation).service(clear_conversation));
}
