//! App Router

use salvo::Router;

use crate::{certificates, verification};

pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("certificates")
                .get(certificates::index::handler)
                .push(
                    Router::new()
                        .hoop(certificates::create::body_limit())
                        .post(certificates::create::handler),
                )
                .push(Router::with_path("new").get(certificates::draft::handler))
                .push(Router::with_path("search").get(certificates::search::handler))
                .push(
                    Router::with_path("{id}")
                        .get(certificates::get::handler)
                        .delete(certificates::delete::handler)
                        .push(Router::with_path("export").get(certificates::export::handler)),
                ),
        )
        .push(Router::with_path("view/{id}").get(certificates::get::handler))
        .push(Router::with_path("verify/{id}").get(verification::verify::handler))
        .push(Router::with_path("public-verify").get(verification::public_verify::handler))
}
