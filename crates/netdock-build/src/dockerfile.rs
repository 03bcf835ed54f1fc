//! Fixed Dockerfile templates.
//!
//! Each template is plain text with `{name}` placeholders. The set of
//! placeholders a template uses is listed by [`Template::placeholders`];
//! [`DockerfileGenerator::render`] fills every one of them.

/// Runtime base image reference.
pub const RUNTIME_IMAGE: &str = "{runtime_image}";
/// Entry assembly name without the `.dll` extension.
pub const ASSEMBLY_NAME: &str = "{assembly_name}";
/// Image of the builder stage in source builds.
pub const BUILDER_IMAGE: &str = "{builder_image}";
/// Startup project path passed to `dotnet publish` in solution builds.
pub const MAIN_PROJECT: &str = "{main_project}";

const PUBLISHED: &str = r#"FROM {runtime_image}
ADD ./ /app
ENV ASPNETCORE_URLS=http://*:${PORT}
WORKDIR /app
ENTRYPOINT [ "dotnet", "{assembly_name}.dll" ]
"#;

const SINGLE_PROJECT: &str = r#"FROM {builder_image} AS builder
COPY . /src
WORKDIR /src
RUN dotnet restore --packages /packages
RUN dotnet publish -c Release -o /published

FROM {runtime_image}
COPY --from=builder /published /app
ENV ASPNETCORE_URLS=http://*:${PORT}
WORKDIR /app
ENTRYPOINT [ "dotnet", "{assembly_name}.dll" ]
"#;

const SOLUTION: &str = r#"FROM {builder_image} AS builder
COPY . /src
WORKDIR /src
RUN dotnet restore --packages /packages
RUN dotnet publish -c Release -o /published {main_project}

FROM {runtime_image}
COPY --from=builder /published /app
ENV ASPNETCORE_URLS=http://*:${PORT}
WORKDIR /app
ENTRYPOINT [ "dotnet", "{assembly_name}.dll" ]
"#;

/// One of the three Dockerfile shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template<'a> {
    /// Wraps already-published binaries, no build stage.
    Published,
    /// Two-stage build of a single project.
    SingleProject,
    /// Two-stage build publishing the startup project of a solution.
    Solution { main_project: &'a str },
}

impl Template<'_> {
    pub fn body(&self) -> &'static str {
        match self {
            Self::Published => PUBLISHED,
            Self::SingleProject => SINGLE_PROJECT,
            Self::Solution { .. } => SOLUTION,
        }
    }

    pub fn placeholders(&self) -> &'static [&'static str] {
        match self {
            Self::Published => &[RUNTIME_IMAGE, ASSEMBLY_NAME],
            Self::SingleProject => &[BUILDER_IMAGE, RUNTIME_IMAGE, ASSEMBLY_NAME],
            Self::Solution { .. } => &[BUILDER_IMAGE, RUNTIME_IMAGE, ASSEMBLY_NAME, MAIN_PROJECT],
        }
    }
}

/// Binds a base image and entry assembly into a [`Template`].
pub struct DockerfileGenerator<'a> {
    template: Template<'a>,
    runtime_image: &'a str,
    assembly_name: &'a str,
    builder_image: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(
        template: Template<'a>,
        runtime_image: &'a str,
        assembly_name: &'a str,
        builder_image: &'a str,
    ) -> Self {
        Self {
            template,
            runtime_image,
            assembly_name,
            builder_image,
        }
    }

    /// Fills the template in one pass, so inserted values are never rescanned.
    pub fn render(&self) -> String {
        let placeholders = self.template.placeholders();
        let mut rest = self.template.body();
        let mut out = String::with_capacity(rest.len() + 128);

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match placeholders.iter().find(|p| tail.starts_with(**p)) {
                Some(placeholder) => {
                    out.push_str(self.value_for(placeholder));
                    rest = &tail[placeholder.len()..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn value_for(&self, placeholder: &str) -> &'a str {
        match (placeholder, self.template) {
            (RUNTIME_IMAGE, _) => self.runtime_image,
            (ASSEMBLY_NAME, _) => self.assembly_name,
            (BUILDER_IMAGE, _) => self.builder_image,
            (MAIN_PROJECT, Template::Solution { main_project }) => main_project,
            _ => "",
        }
    }
}
