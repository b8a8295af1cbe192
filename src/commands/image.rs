use crate::api::types::{Image, ImageCreateRequest};
use crate::cli::{ConnectionArgs, ImageCommands};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_success, print_table};
use crate::validate::{require_image_type, require_min_len};

pub fn handle_image_command(cmd: &ImageCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        ImageCommands::List { format } => {
            let client = connect(connection)?;
            let images = client.list_images()?;

            if is_table(format) {
                print_table(
                    &["Name", "Type", "UUID", "Status", "Size", "Source"],
                    image_rows(&images.entities),
                    Some(vec![
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        "Total".to_string(),
                        images.entities.len().to_string(),
                    ]),
                );
            } else {
                output_data(&images.entities, format)?;
            }
        }

        ImageCommands::Create {
            image_name,
            image_description,
            image_type,
            image_source,
        } => {
            require_min_len("image-name", image_name, 3)?;
            require_min_len("image-description", image_description, 3)?;
            require_image_type(image_type)?;
            require_min_len("image-source", image_source, 3)?;

            let request = ImageCreateRequest::new(image_name, image_description, image_type, image_source);

            let client = connect(connection)?;
            tracing::info!(name = %image_name, source = %image_source, "creating image");
            let image = client.create_image(&request)?;

            print_table(
                &["Name", "UUID", "Description", "Status"],
                vec![vec![
                    cell(image.spec.name.as_deref()),
                    cell(image.metadata.uuid.as_deref()),
                    cell(image.spec.description.as_deref()),
                    cell(image.status.state.as_deref()),
                ]],
                None,
            );
            print_success(&format!("image '{}' submitted", image_name));
        }
    }
    Ok(())
}

pub(crate) fn image_rows(images: &[Image]) -> Vec<Vec<String>> {
    images
        .iter()
        .map(|image| {
            vec![
                cell(image.spec.name.as_deref()),
                cell(image.spec.resources.image_type.as_deref()),
                cell(image.metadata.uuid.as_deref()),
                cell(image.status.state.as_deref()),
                image
                    .status
                    .resources
                    .size_bytes
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                cell(image.status.resources.source_uri.as_deref()),
            ]
        })
        .collect()
}
