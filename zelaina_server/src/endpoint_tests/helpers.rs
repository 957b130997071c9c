use actix_web::{
    body,
    error::ResponseError,
    http::StatusCode,
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
    HttpResponse,
};
use serde::Serialize;

/// Calls the service and flattens both outcomes into (status, body). Handler errors surface as
/// `Err` from `try_call_service`, and their wire form comes from `ResponseError::error_response`.
async fn call<F: FnOnce(&mut ServiceConfig)>(req: TestRequest, configure: F) -> (StatusCode, String) {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => {
            let status = res.status();
            let bytes = test::read_body(res).await;
            (status, String::from_utf8_lossy(&bytes).into_owned())
        },
        Err(e) => response_parts(e.as_response_error().error_response()).await,
    }
}

async fn response_parts(res: HttpResponse) -> (StatusCode, String) {
    let status = res.status();
    let bytes = body::to_bytes(res.into_body()).await.unwrap_or_default();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn get_request<F: FnOnce(&mut ServiceConfig)>(path: &str, configure: F) -> (StatusCode, String) {
    call(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<T: Serialize, F: FnOnce(&mut ServiceConfig)>(
    path: &str,
    body: &T,
    configure: F,
) -> (StatusCode, String) {
    call(TestRequest::post().uri(path).set_json(body), configure).await
}
