use actix_web::web::{scope, ServiceConfig};

use ebooks::get_ebooks;

mod ebooks;
mod health_check;

use crate::routes::health_check::*;

pub fn ebook_catalog_routes(conf: &mut ServiceConfig) {
    conf.service(scope("").service(get_ebooks).service(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn health_check_responds_ok() {
        let app = test::init_service(App::new().configure(ebook_catalog_routes)).await;
        let request = test::TestRequest::get().uri("/health_check").to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }
}
