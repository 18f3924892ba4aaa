use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    dal::ChatStore,
    routes::{
        assistant_route, auth_route, chat_route, deals_route, default_route, history_route,
        RevalidationWindow,
    },
    services::{Assistant, ChatCompleter, DealScraper, SessionProvider},
};

/// Everything the handlers share, built once in `main` (or by tests with fakes).
pub struct AppState {
    pub deals: DealScraper,
    pub revalidation: RevalidationWindow,
    pub chat: Arc<dyn ChatCompleter>,
    pub sessions: Arc<dyn SessionProvider>,
    pub store: Arc<dyn ChatStore>,
}

pub fn run(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let deals = Arc::new(state.deals);
    let assistant = Assistant::new(state.store, state.chat.clone(), deals.clone());

    let deals = web::Data::from(deals);
    let revalidation = web::Data::new(state.revalidation);
    let chat: web::Data<dyn ChatCompleter> = web::Data::from(state.chat);
    let sessions: web::Data<dyn SessionProvider> = web::Data::from(state.sessions);
    let assistant = web::Data::new(assistant);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(
                web::scope("/api")
                    .service(deals_route::get_deals)
                    .service(chat_route::chat)
                    .service(
                        web::scope("/auth")
                            .service(auth_route::sign_up)
                            .service(auth_route::login)
                            .service(auth_route::logout)
                            .service(auth_route::current_user),
                    )
                    .service(
                        web::scope("/assistant")
                            .service(assistant_route::open)
                            .service(assistant_route::set_location)
                            .service(assistant_route::send_message),
                    )
                    .service(
                        web::scope("/conversations")
                            .service(history_route::conversations)
                            .service(history_route::messages),
                    ),
            )
            .app_data(deals.clone())
            .app_data(revalidation.clone())
            .app_data(chat.clone())
            .app_data(sessions.clone())
            .app_data(assistant.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
