use aws_sdk_codebuild::error::DisplayErrorContext;
use aws_sdk_codebuild::types::Build;
use build_trigger_core::contract::{BuildRequest, BuildStartAck, BuildStartError};
use build_trigger_lambda::adapters::build_service::BuildStarter;
use build_trigger_lambda::handlers::trigger::handle_trigger_event;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

struct CodeBuildStarter {
    codebuild_client: aws_sdk_codebuild::Client,
}

impl BuildStarter for CodeBuildStarter {
    fn start_build(&self, request: &BuildRequest) -> Result<BuildStartAck, BuildStartError> {
        let project_name = request.project_name.clone();
        let client = self.codebuild_client.clone();
        tracing::debug!(project_name = %project_name, "sending StartBuild request");

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .start_build()
                    .project_name(project_name)
                    .send()
                    .await
                    .map(|output| ack_from_build(output.build_value()))
                    .map_err(|error| {
                        BuildStartError::new(format!(
                            "failed to start build: {}",
                            DisplayErrorContext(&error)
                        ))
                    })
            })
        })
    }
}

fn ack_from_build(build: Option<&Build>) -> BuildStartAck {
    let Some(build) = build else {
        return BuildStartAck::default();
    };

    BuildStartAck {
        build_id: build.id().map(str::to_string),
        build_status: build
            .build_status()
            .map(|status| status.as_str().to_string()),
    }
}

fn handle_with_starter(
    event: LambdaEvent<Value>,
    starter: &dyn BuildStarter,
) -> Result<String, Error> {
    let _span =
        tracing::info_span!("invocation", request_id = %event.context.request_id).entered();
    handle_trigger_event(&event.payload, starter).map_err(Error::from)
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<String, Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let starter = CodeBuildStarter {
        codebuild_client: aws_sdk_codebuild::Client::new(&aws_config),
    };

    handle_with_starter(event, &starter)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();
    lambda_runtime::run(service_fn(handle_request)).await
}
