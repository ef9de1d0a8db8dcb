use crate::error::TimerbotError;
use actix_web::HttpRequest;

pub const USER_HEADER: &str = "timerbot-user";
pub const ORIGIN_HEADER: &str = "timerbot-origin";

/// Who is making a request and where announcements about it should go
#[derive(Debug, Clone, PartialEq)]
pub struct Requester {
    pub user: String,
    /// The channel the command came from. Without one the request is treated
    /// as a direct message and the user is the origin.
    pub origin: String,
}

fn header_value(req: &HttpRequest, name: &str) -> Result<Option<String>, TimerbotError> {
    match req.headers().get(name) {
        None => Ok(None),
        Some(value) => {
            let value = value.to_str().map_err(|_| {
                TimerbotError::BadClientData(format!("The `{}` header is not valid text", name))
            })?;
            let value = value.trim();
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }
    }
}

/// Identifies the caller from the chat platform headers
pub fn protect_route(req: &HttpRequest) -> Result<Requester, TimerbotError> {
    let user = header_value(req, USER_HEADER)?.ok_or_else(|| {
        TimerbotError::UnidentifiableClient("Unable to find the user making the request".into())
    })?;
    let origin = header_value(req, ORIGIN_HEADER)?.unwrap_or_else(|| user.clone());

    Ok(Requester { user, origin })
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn origin_defaults_to_the_user() {
        let req = TestRequest::default()
            .insert_header((USER_HEADER, "alice"))
            .to_http_request();
        assert_eq!(
            protect_route(&req).unwrap(),
            Requester {
                user: "alice".into(),
                origin: "alice".into()
            }
        );

        let req = TestRequest::default()
            .insert_header((USER_HEADER, "alice"))
            .insert_header((ORIGIN_HEADER, "general"))
            .to_http_request();
        assert_eq!(protect_route(&req).unwrap().origin, "general");
    }

    #[test]
    fn rejects_anonymous_requests() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            protect_route(&req),
            Err(TimerbotError::UnidentifiableClient(_))
        ));

        let req = TestRequest::default()
            .insert_header((USER_HEADER, "  "))
            .to_http_request();
        assert!(protect_route(&req).is_err());
    }
}
