use build_trigger_core::contract::{BuildRequest, BuildStartAck, BuildStartError};

pub trait BuildStarter {
    fn start_build(&self, request: &BuildRequest) -> Result<BuildStartAck, BuildStartError>;
}
