use poem::{Error as PoemError, Result as PoemResult, http::StatusCode};
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;

use crate::{application::services::jwt::JwtService, domain::value_objects::RecipientId};

#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct JwtAuth(pub Bearer);

pub struct AuthenticatedOperator {
    pub operator: RecipientId,
}

impl JwtAuth {
    pub fn into_operator(self, jwt: &JwtService) -> PoemResult<AuthenticatedOperator> {
        match jwt.verify(&self.0.token) {
            Ok(claims) => Ok(AuthenticatedOperator {
                operator: claims.sub,
            }),
            Err(_) => Err(PoemError::from_string(
                "invalid or expired token",
                StatusCode::UNAUTHORIZED,
            )),
        }
    }
}
