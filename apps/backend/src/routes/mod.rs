use actix_web::web;

pub mod auth;
pub mod customers;
pub mod health;
pub mod invoice_details;
pub mod invoices;
pub mod schedules;
pub mod services;
pub mod technicians;
pub mod users;

/// Configure the full route tree. Role enforcement happens inside the
/// handlers via the CurrentUser extractor, so tests can register the same
/// paths without extra wrapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.route("/health", web::get().to(health::health));

    cfg.service(
        web::scope("/api/v1")
            .service(web::scope("/auth").configure(auth::configure_routes))
            .route("/me", web::get().to(auth::me))
            .service(web::scope("/users").configure(users::configure_routes))
            .service(web::scope("/customers").configure(customers::configure_routes))
            .service(web::scope("/technicians").configure(technicians::configure_routes))
            .service(web::scope("/services").configure(services::configure_routes))
            .service(web::scope("/schedules").configure(schedules::configure_routes))
            .service(web::scope("/invoices").configure(invoices::configure_routes))
            .service(
                web::scope("/invoice-details").configure(invoice_details::configure_routes),
            ),
    );
}
