//! Demo application exercising the full default chain.
//!
//! Run with `cargo run --example demo`, then e.g.:
//!
//! ```text
//! curl -i http://127.0.0.1:8082/login
//! curl -i -X POST -d 'username=waypoint&password=open+sesame' \
//!     -H 'Content-Type: application/x-www-form-urlencoded' http://127.0.0.1:8082/login
//! curl -i -b 'session=<token from Set-Cookie>' http://127.0.0.1:8082/users/42
//! ```

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use waypoint_app::{serve, App};
use waypoint_middleware::{
    sign, CookieAuth, ParseForm, ParseJson, Recovery, RequestLogger, StaticFiles,
};
use waypoint_router::{Context, Response, RouteError};

const SECRET: &[u8] = b"waypoint-demo-secret";

const LOGIN_FORM: &str = r#"<html><body>
<form action="/login" method="POST">
  <input type="text" name="username">
  <input type="password" name="password">
  <input type="submit" value="login">
</form>
</body></html>"#;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("subscriber already set");

    let app = App::new()
        .middleware(RequestLogger)
        .middleware(Recovery)
        .middleware(ParseForm)
        .middleware(ParseJson)
        .middleware(StaticFiles::new("public"))
        .middleware(CookieAuth::new(SECRET, "/login").ignore(&["/public"]))
        .get("/", |_ctx| async { Ok(Response::text("welcome")) })
        .get("/about", |_ctx| async { Ok(Response::text("about")) })
        .get("/users/:id", |ctx: Context| async move {
            if ctx.param("id") == Some("0") {
                return Err(RouteError::handler("id is zero"));
            }
            let id = ctx.param("id").unwrap_or("unknown").to_string();
            Ok(Response::text(format!("retrieve user {id}")))
        })
        .get(
            "/users/:user_id/addresses/:address_id",
            |ctx: Context| async move {
                let user = ctx.param("user_id").unwrap_or("unknown").to_string();
                let address = ctx.param("address_id").unwrap_or("unknown").to_string();
                Ok(Response::text(format!(
                    "retrieve user {user}'s address {address}"
                )))
            },
        )
        .post("/users", |ctx: Context| async move {
            let fields: serde_json::Map<String, serde_json::Value> = ctx
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect();
            Ok(Response::json(&fields))
        })
        .get("/login", |_ctx| async { Ok(Response::html(LOGIN_FORM)) })
        .post("/login", |ctx: Context| async move {
            // The credential check is demo business logic, not framework.
            if ctx.param("username") == Some("waypoint")
                && ctx.param("password") == Some("open sesame")
            {
                let token = sign::sign(SECRET, "waypoint");
                Ok(Response::redirect("/").set_cookie("session", &token))
            } else {
                Ok(Response::redirect("/login"))
            }
        });

    serve("127.0.0.1:8082", app.build()).await
}
