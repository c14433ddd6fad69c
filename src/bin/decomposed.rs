use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::{Context, bail};
    use clap::{Parser, Subcommand};
    use decomposed::{
        ComponentAccessor, DecompositionConfig, EulerAngles, Skew,
        TransformComponent, TransformField,
        angle::{Angle, Degrees},
        decompose_with_config, matrix_from_column_major, matrix_to_column_major,
        with_trace_logging,
    };
    use nalgebra::{Matrix4, UnitQuaternion, Vector2, Vector3, Vector4};
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    #[derive(Debug, Parser)]
    #[command(about = "Decompose and recompose 4x4 transformation matrices", long_about = None)]
    struct Cli {
        /// Path to RON file with decomposition configuration parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print all components of a matrix
        Decompose {
            /// The 16 matrix elements in column-major order, separated by commas
            #[arg(short, long, allow_hyphen_values = true)]
            matrix: String,
        },
        /// Print a single component of a matrix
        Get {
            /// The 16 matrix elements in column-major order, separated by commas
            #[arg(short, long, allow_hyphen_values = true)]
            matrix: String,

            /// The component to print
            #[arg(short, long, value_enum)]
            field: TransformField,

            /// Print Euler angles in degrees rather than radians
            #[arg(long)]
            degrees: bool,
        },
        /// Replace a single component of a matrix and print the new matrix
        Set {
            /// The 16 matrix elements in column-major order, separated by commas
            #[arg(short, long, allow_hyphen_values = true)]
            matrix: String,

            /// The component to replace
            #[arg(short, long, value_enum)]
            field: TransformField,

            /// The new component values, separated by commas (quaternions are
            /// given as x, y, z, w)
            #[arg(short, long, allow_hyphen_values = true)]
            value: String,

            /// Interpret Euler angles as degrees rather than radians
            #[arg(long)]
            degrees: bool,
        },
        /// Write the default configuration to a RON file
        GenerateConfig {
            /// Path of the output file
            #[arg(short, long)]
            output_path: PathBuf,

            /// Overwrite the output file if it already exists
            #[arg(long)]
            force_overwrite: bool,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        let config = match &cli.config {
            Some(config_path) => parse_ron_file(config_path)?,
            None => DecompositionConfig::default(),
        };
        log::debug!("Using {:?}", config);

        match cli.command {
            Command::Decompose { matrix } => {
                let matrix = parse_matrix(&matrix)?;
                let decomposed = with_trace_logging!("Decomposing matrix"; {
                    decompose_with_config(&matrix, &config)
                })?;
                println!("{}", decomposed);
            }
            Command::Get {
                matrix,
                field,
                degrees,
            } => {
                let matrix = parse_matrix(&matrix)?;
                let component = ComponentAccessor::new(config).get(&matrix, field);
                match component {
                    TransformComponent::EulerAngles(angles) if degrees => {
                        let [x, y, z] = angles.as_radians().map(|angle| angle.degrees());
                        println!("euler angles: (x: {}, y: {}, z: {}) deg", x, y, z);
                    }
                    _ => println!("{}", component),
                }
            }
            Command::Set {
                matrix,
                field,
                value,
                degrees,
            } => {
                let matrix = parse_matrix(&matrix)?;
                let component = parse_component(field, &parse_values(&value)?, degrees)?;
                let updated = with_trace_logging!("Setting {:?} of matrix", field; {
                    ComponentAccessor::new(config).set(&matrix, component)
                });
                println!("{}", format_values(&matrix_to_column_major(&updated)));
            }
            Command::GenerateConfig {
                output_path,
                force_overwrite,
            } => {
                if output_path.exists() && !force_overwrite {
                    bail!(
                        "{} already exists (use --force-overwrite to replace it)",
                        output_path.display()
                    );
                }
                write_ron_file(&DecompositionConfig::<f64>::default(), &output_path)?;
                println!("Wrote default configuration to {}", output_path.display());
            }
        }
        Ok(())
    }

    fn parse_values(text: &str) -> Result<Vec<f64>> {
        text.split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<f64>()
                    .with_context(|| format!("Invalid number `{}`", value))
            })
            .collect()
    }

    fn parse_matrix(text: &str) -> Result<Matrix4<f64>> {
        let values = parse_values(text)?;
        let values: [f64; 16] = values.as_slice().try_into().with_context(|| {
            format!(
                "Expected 16 matrix elements, got {} ({})",
                values.len(),
                text
            )
        })?;
        Ok(matrix_from_column_major(&values))
    }

    fn parse_component(
        field: TransformField,
        values: &[f64],
        degrees: bool,
    ) -> Result<TransformComponent<f64>> {
        let expected_len = match field {
            TransformField::TranslationXY | TransformField::ScaleXY => 2,
            TransformField::Translation
            | TransformField::Scale
            | TransformField::EulerAngles
            | TransformField::Skew => 3,
            TransformField::Rotation | TransformField::Perspective => 4,
        };
        if values.len() != expected_len {
            bail!(
                "Expected {} values for {:?}, got {}",
                expected_len,
                field,
                values.len()
            );
        }

        Ok(match field {
            TransformField::Translation => {
                TransformComponent::Translation(Vector3::from_column_slice(values))
            }
            TransformField::TranslationXY => {
                TransformComponent::TranslationXY(Vector2::from_column_slice(values))
            }
            TransformField::Scale => TransformComponent::Scale(Vector3::from_column_slice(values)),
            TransformField::ScaleXY => {
                TransformComponent::ScaleXY(Vector2::from_column_slice(values))
            }
            TransformField::Rotation => {
                let quaternion = Vector4::from_column_slice(values);
                if quaternion.norm() == 0.0 {
                    bail!("Rotation quaternion must be non-zero");
                }
                TransformComponent::Rotation(UnitQuaternion::from_quaternion(quaternion.into()))
            }
            TransformField::EulerAngles => TransformComponent::EulerAngles(if degrees {
                EulerAngles::from_angles(Degrees(values[0]), Degrees(values[1]), Degrees(values[2]))
            } else {
                EulerAngles::new(values[0], values[1], values[2])
            }),
            TransformField::Skew => {
                TransformComponent::Skew(Skew::new(values[0], values[1], values[2]))
            }
            TransformField::Perspective => {
                TransformComponent::Perspective(Vector4::from_column_slice(values))
            }
        })
    }

    fn format_values(values: &[f64]) -> String {
        values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn parse_ron_file<T>(file_path: &Path) -> Result<T>
    where
        T: for<'de> serde::de::Deserialize<'de>,
    {
        let text = fs::read_to_string(file_path)
            .with_context(|| format!("Could not open {}", file_path.display()))?;

        ron::from_str::<T>(&text)
            .map_err(anyhow::Error::from)
            .with_context(|| format!("Invalid syntax in {}", file_path.display()))
    }

    fn write_ron_file<T>(value: &T, output_file_path: &Path) -> Result<()>
    where
        T: serde::ser::Serialize,
    {
        let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
        fs::write(output_file_path, text)
            .with_context(|| format!("Could not write {}", output_file_path.display()))
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
