use anyhow::Result;

use crate::application::NewVehicle;
use crate::cli::OutputFormat;
use crate::domain::Vehicle;

use super::super::Container;

pub struct VehicleController<'a> {
    container: &'a Container,
}

impl<'a> VehicleController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add(
        &self,
        branch_id: String,
        plate: String,
        model: String,
        current_km: i64,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewVehicle {
            branch_id,
            plate,
            model,
            current_km,
        };
        let vehicle = self.container.vehicles_use_case().create(input).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&vehicle)?,
            OutputFormat::Text => {
                format!("Created vehicle {} ({})", vehicle.summary(), vehicle.id())
            }
        })
    }

    pub async fn list(&self, branch_id: String, format: OutputFormat) -> Result<String> {
        let vehicles = self.container.vehicles_use_case().list(&branch_id).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&vehicles)?,
            OutputFormat::Text => self.format_vehicle_list(&vehicles),
        })
    }

    pub async fn odometer(
        &self,
        vehicle_id: String,
        km: i64,
        format: OutputFormat,
    ) -> Result<String> {
        let vehicle = self
            .container
            .vehicles_use_case()
            .update_odometer(&vehicle_id, km)
            .await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&vehicle)?,
            OutputFormat::Text => format!("{} now at {} km", vehicle.plate(), vehicle.current_km()),
        })
    }

    pub async fn delete(&self, vehicle_id: String) -> Result<String> {
        self.container.vehicles_use_case().delete(&vehicle_id).await?;
        Ok("Vehicle deleted successfully.".to_string())
    }

    fn format_vehicle_list(&self, vehicles: &[Vehicle]) -> String {
        if vehicles.is_empty() {
            return "No vehicles.".to_string();
        }

        let mut output = String::new();
        for vehicle in vehicles {
            output.push_str(&format!("  {} ({})\n", vehicle.summary(), vehicle.id()));
        }
        output
    }
}
