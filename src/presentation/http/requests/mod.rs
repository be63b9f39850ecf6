use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct SubmitBroadcastRequestDto {
    #[oai(validator(min_length = 1, max_length = 4096))]
    pub text: String,
}
