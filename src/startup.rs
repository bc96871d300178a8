use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::SqlitePool;

use crate::{
    configuration::ReconciliationSettings,
    dal::company_db::CompanyStore,
    routes::{company_route, default_route, reconcile_route},
    services::{DirectoryClient, ReconciliationPipeline},
};

pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    directory_client: DirectoryClient,
    pipeline: ReconciliationPipeline,
    reconciliation: ReconciliationSettings,
) -> Result<Server, std::io::Error> {
    let company_store = web::Data::new(CompanyStore::new(db_pool.clone()));
    let db_pool = web::Data::new(db_pool);
    let directory_client = web::Data::new(directory_client);
    let pipeline = web::Data::new(pipeline);
    let reconciliation = web::Data::new(reconciliation);
    let reconcile_lock = web::Data::new(reconcile_route::ReconcileLock::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure_routes)
            .app_data(db_pool.clone())
            .app_data(company_store.clone())
            .app_data(directory_client.clone())
            .app_data(pipeline.clone())
            .app_data(reconciliation.clone())
            .app_data(reconcile_lock.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(default_route::default)
        .service(
            web::scope("/companies")
                .service(company_route::get_companies)
                .service(company_route::create_company)
                .service(company_route::check_company)
                .service(company_route::import_companies)
                .service(company_route::reset_companies)
                .service(company_route::delete_companies),
        )
        .service(
            web::scope("/reconcile")
                .service(reconcile_route::run_reconciliation)
                .service(reconcile_route::cancel_reconciliation),
        );
}
