use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};
use std::collections::HashMap;

/// One submitted form entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    /// A multipart part sent with a file name. Its content is not read.
    File,
}

/// Submitted form fields as a flat name to value map.
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`
/// bodies. When a name repeats, the last entry wins, whether it is text or a
/// file.
#[derive(Debug, Clone, Default)]
pub struct FormFields(pub HashMap<String, FormValue>);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = if field.file_name().is_some() {
                    FormValue::File
                } else {
                    FormValue::Text(field.text().await.map_err(IntoResponse::into_response)?)
                };
                fields.insert(name, value);
            }

            Ok(Self(fields))
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            Ok(Self(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, FormValue::Text(value)))
                    .collect(),
            ))
        }
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}
