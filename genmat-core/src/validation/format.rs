//! Shape, density and format compatibility rules
//!
//! Pure functions shared by the resolver and by the promotion rules.

use crate::error::ConfigError;
use crate::features::{Density, Format, OptFlag, Shape};

/// Formats a shape may be stored in
///
/// The diagonal shapes return an empty slice: they use implicit storage and
/// accept no explicit format.
pub const fn legal_formats(shape: Shape) -> &'static [Format] {
    match shape {
        Shape::Rect => &[Format::Array, Format::Csr, Format::Csc, Format::Coo],
        Shape::Diag | Shape::Scalar | Shape::Ident | Shape::Zero => &[],
        Shape::LowerTriang | Shape::UpperTriang => {
            &[Format::Vector, Format::Array, Format::Dia, Format::Sky]
        }
        Shape::Symm => &[Format::Vector, Format::Array, Format::Sky],
        Shape::BandDiag => &[Format::Vector, Format::Dia],
        Shape::LowerBandTriang | Shape::UpperBandTriang => {
            &[Format::Vector, Format::Dia, Format::Sky]
        }
    }
}

/// Check a (shape, format) pair
pub fn validate_format_for_shape(shape: Shape, format: Option<Format>) -> Result<(), ConfigError> {
    let legal = match format {
        Some(format) => legal_formats(shape).contains(&format),
        None => shape.is_diagonal(),
    };
    if legal {
        Ok(())
    } else {
        Err(ConfigError::IllegalFormatForShape { shape, format })
    }
}

/// Check that density and format agree
///
/// Coordinate formats never store zeros and need sparse density; the dense
/// array stores every position and needs dense density.
pub const fn validate_density(density: Density, format: Format) -> Result<(), ConfigError> {
    let mismatch = match density {
        Density::Dense => format.is_coordinate(),
        Density::Sparse => matches!(format, Format::Array),
    };
    if mismatch {
        Err(ConfigError::DensityFormatMismatch { density, format })
    } else {
        Ok(())
    }
}

/// Density implied by an explicitly chosen format
pub const fn density_for_format(format: Option<Format>) -> Option<Density> {
    match format {
        Some(Format::Array | Format::Vector) => Some(Density::Dense),
        Some(_) => Some(Density::Sparse),
        None => None,
    }
}

/// Format derived from shape, density and optimisation flag
pub const fn default_format(shape: Shape, density: Density, opt: OptFlag) -> Option<Format> {
    let speed = matches!(opt, OptFlag::Speed);
    match (shape, density) {
        (Shape::Rect, Density::Dense) => Some(Format::Array),
        (Shape::Rect, Density::Sparse) => Some(Format::Coo),
        (Shape::LowerTriang | Shape::UpperTriang | Shape::Symm, Density::Dense) => {
            if speed {
                Some(Format::Array)
            } else {
                Some(Format::Vector)
            }
        }
        (Shape::LowerTriang | Shape::UpperTriang, Density::Sparse) => {
            if speed {
                Some(Format::Dia)
            } else {
                Some(Format::Sky)
            }
        }
        (Shape::Symm, Density::Sparse) => Some(Format::Sky),
        (Shape::BandDiag, Density::Dense) => Some(Format::Vector),
        (Shape::BandDiag, Density::Sparse) => Some(Format::Dia),
        (Shape::LowerBandTriang | Shape::UpperBandTriang, Density::Dense) => Some(Format::Vector),
        (Shape::LowerBandTriang | Shape::UpperBandTriang, Density::Sparse) => {
            if speed {
                Some(Format::Dia)
            } else {
                Some(Format::Sky)
            }
        }
        (Shape::Diag | Shape::Scalar | Shape::Ident | Shape::Zero, _) => None,
    }
}
