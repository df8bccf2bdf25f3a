//! Application state carried between a generate action and later re-renders

use anyhow::{Context, Result, bail};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::{PlateSpec, SteelGrade};
use crate::geometry::{PlateGeometry, WeightResult};
use crate::mesh::{
    Triangle, ValidationResult, triangles_from_geometry, validate_mesh, write_stl_ascii_to,
    write_stl_to,
};
use crate::outline::write_dxf_to;
use crate::preview::PreviewSurface;

pub const STL_FILE_NAME: &str = "chapa.stl";
pub const DXF_FILE_NAME: &str = "chapa.dxf";
pub const DOWNLOAD_MIME: &str = "application/octet-stream";

/// Where and how a generation writes its files
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub ascii_stl: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            ascii_stl: false,
        }
    }
}

/// A file produced by a generation, offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub mime: &'static str,
}

impl Artifact {
    fn download(path: PathBuf) -> Self {
        Self {
            path,
            mime: DOWNLOAD_MIME,
        }
    }
}

/// Everything produced by one generate action
#[derive(Debug, Clone)]
pub struct Generation {
    pub spec: PlateSpec,
    pub grade: SteelGrade,
    pub geometry: PlateGeometry,
    pub weight: WeightResult,
    pub triangles: Vec<Triangle>,
    pub validation: ValidationResult,
    pub stl: Artifact,
    pub dxf: Artifact,
}

impl Generation {
    pub fn stl_path(&self) -> &Path {
        &self.stl.path
    }

    pub fn dxf_path(&self) -> &Path {
        &self.dxf.path
    }

    /// Downloadable files in display order: mesh, then outline
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        [&self.stl, &self.dxf].into_iter()
    }
}

/// Session state: empty until the first generation, then holds the latest one
#[derive(Debug, Default)]
pub struct Session {
    last: Option<Generation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the plate, write both output files and remember the result
    ///
    /// Both files are staged under temporary names in the output directory
    /// and renamed into place only once both are complete. Any failure up to
    /// that point leaves the files on disk and the stored generation
    /// untouched. If the outline rename fails after the mesh was already
    /// replaced, the stored generation is dropped since it no longer matches
    /// what is on disk.
    pub fn generate(
        &mut self,
        spec: PlateSpec,
        grade: SteelGrade,
        options: &GenerateOptions,
    ) -> Result<&Generation> {
        let geometry = PlateGeometry::from_spec(&spec);
        let weight = WeightResult::compute(&geometry, grade);
        debug!(
            width = spec.width_mm,
            length = spec.length_mm,
            thickness = spec.thickness_mm,
            grade = %grade,
            mass_kg = weight.mass_kg,
            "plate computed"
        );

        let triangles = triangles_from_geometry(&geometry);
        let validation = validate_mesh(&triangles);
        for message in &validation.warnings {
            warn!("{}", message);
        }
        if !validation.is_valid() {
            bail!("Mesh cannot be exported: {}", validation.summary());
        }

        let out_dir = &options.out_dir;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
        let stl_path = out_dir.join(STL_FILE_NAME);
        let dxf_path = out_dir.join(DXF_FILE_NAME);
        for target in [&stl_path, &dxf_path] {
            if target.is_dir() {
                bail!("Output path is a directory: {}", target.display());
            }
        }

        let mut stl_staged = stage(out_dir)?;
        {
            let mut writer = BufWriter::new(stl_staged.as_file_mut());
            let written = if options.ascii_stl {
                write_stl_ascii_to(&mut writer, "chapa", &triangles)
            } else {
                write_stl_to(&mut writer, &triangles)
            };
            written.with_context(|| format!("Failed to write STL file: {}", stl_path.display()))?;
        }

        let mut dxf_staged = stage(out_dir)?;
        write_dxf_to(&mut BufWriter::new(dxf_staged.as_file_mut()), &geometry)
            .with_context(|| format!("Failed to write DXF file: {}", dxf_path.display()))?;

        stl_staged
            .persist(&stl_path)
            .with_context(|| format!("Failed to replace {}", stl_path.display()))?;
        if let Err(e) = dxf_staged.persist(&dxf_path) {
            self.last = None;
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to replace {}", dxf_path.display())));
        }
        debug!(stl = %stl_path.display(), dxf = %dxf_path.display(), "outputs written");

        let generation = self.last.insert(Generation {
            spec,
            grade,
            geometry,
            weight,
            triangles,
            validation,
            stl: Artifact::download(stl_path),
            dxf: Artifact::download(dxf_path),
        });
        Ok(generation)
    }

    /// Re-render the last generation at a new opacity without recomputing it
    pub fn preview(&self, opacity: f64) -> Option<PreviewSurface> {
        self.last
            .as_ref()
            .map(|generation| PreviewSurface::from_triangles(&generation.triangles, opacity))
    }

    pub fn last(&self) -> Option<&Generation> {
        self.last.as_ref()
    }
}

fn stage(out_dir: &Path) -> Result<NamedTempFile> {
    NamedTempFile::new_in(out_dir)
        .with_context(|| format!("Failed to create temporary file in {}", out_dir.display()))
}
