use chrono::NaiveDate;
use gloo::net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use shared::{Employee, ScheduleEntry, Unit, UnitAssignment};

/// Percent-encode a filter value before it is interpolated into a
/// PostgREST query string. Free-text input containing `#`, `&` or `%`
/// would otherwise truncate the query or inject extra parameters.
fn filter_value(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

// Build-time configuration; the fallbacks point at the hosted project so a
// plain `trunk build` works without extra setup.
const DEFAULT_PROJECT_URL: &str = match option_env!("SUPABASE_URL") {
    Some(url) => url,
    None => "https://escala-mensal.supabase.co",
};
const DEFAULT_ANON_KEY: &str = match option_env!("SUPABASE_ANON_KEY") {
    Some(key) => key,
    None => "public-anon-key",
};

/// Client for the hosted Supabase backend: PostgREST row queries under
/// `/rest/v1/` and GoTrue identity calls under `/auth/v1/`.
///
/// Read paths treat not-found as a normal `Ok(None)` / empty-vec outcome;
/// `Err` is reserved for network and decode failures.
#[derive(Clone, PartialEq)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a client against the configured project.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_PROJECT_URL.trim_end_matches('/').to_string(),
            anon_key: DEFAULT_ANON_KEY.to_string(),
        }
    }

    /// Create a client against an explicit project URL and anon key.
    pub fn with_config(base_url: String, anon_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn rest(&self, path_and_query: &str) -> RequestBuilder {
        Request::get(&format!("{}/rest/v1/{}", self.base_url, path_and_query))
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
    }

    /// Resolve one employee by CPF. Not-found is a normal outcome.
    pub async fn employee_by_cpf(&self, cpf: &str) -> Result<Option<Employee>, String> {
        let query = format!(
            "funcionarios?select=id,nome,cpf&cpf=eq.{}&limit=1",
            filter_value(cpf)
        );
        let rows: Vec<Employee> = self.fetch_rows(&query).await?;
        Ok(rows.into_iter().next())
    }

    /// Schedule entries for one employee within a date range, joined with
    /// the day's unit name, ordered by day.
    pub async fn schedules_for_employee(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, String> {
        let query = format!(
            "escalas?select=*,unidade:unidades(nome)&funcionario_id=eq.{}&dia=gte.{}&dia=lte.{}&order=dia.asc",
            filter_value(employee_id),
            from,
            to
        );
        self.fetch_rows(&query).await
    }

    /// Resolve one unit by its (already uppercased) code.
    pub async fn unit_by_code(&self, code: &str) -> Result<Option<Unit>, String> {
        let query = format!(
            "unidades?select=id,codigo,nome&codigo=eq.{}&limit=1",
            filter_value(code)
        );
        let rows: Vec<Unit> = self.fetch_rows(&query).await?;
        Ok(rows.into_iter().next())
    }

    /// Employees assigned to a unit, through the assignment table.
    pub async fn unit_members(&self, unit_id: &str) -> Result<Vec<Employee>, String> {
        let query = format!(
            "funcionarios_unidades?select=funcionario:funcionarios(id,nome,cpf)&unidade_id=eq.{}",
            filter_value(unit_id)
        );
        let rows: Vec<UnitAssignment> = self.fetch_rows(&query).await?;
        Ok(rows.into_iter().map(|r| r.employee).collect())
    }

    /// Schedule entries for a set of employees within a date range. Used
    /// by the unit matrix: fetching by member set (instead of by unit)
    /// keeps days an employee is scheduled at another unit visible.
    pub async fn schedules_for_employees(
        &self,
        employee_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, String> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "escalas?select=*,unidade:unidades(nome)&funcionario_id=in.({})&dia=gte.{}&dia=lte.{}&order=dia.asc",
            employee_ids
                .iter()
                .map(|id| filter_value(id))
                .collect::<Vec<_>>()
                .join(","),
            from,
            to
        );
        self.fetch_rows(&query).await
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<T>, String> {
        match self.rest(path_and_query).send().await {
            Ok(response) => {
                if response.ok() {
                    response
                        .json::<Vec<T>>()
                        .await
                        .map_err(|e| format!("Failed to parse rows: {}", e))
                } else {
                    Err(format!("Query failed with status {}", response.status()))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Check a recovery token by loading the user it belongs to. A
    /// successful response means the one-time token established a usable
    /// session for the password update.
    pub async fn verify_recovery_token(&self, access_token: &str) -> Result<(), String> {
        match Request::get(&format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(auth_error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Submit the new password for the user behind the recovery token.
    /// Backend rejections (weak password, expired session) surface their
    /// message verbatim.
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), String> {
        let body = serde_json::json!({ "password": new_password });
        match Request::put(&format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", access_token))
            .json(&body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(auth_error_message(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for SupabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

/// GoTrue error bodies carry the message under `msg` or
/// `error_description` depending on the endpoint.
async fn auth_error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("msg")
            .or_else(|| body.get("error_description"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
        Err(_) => format!("Request failed with status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::filter_value;

    #[test]
    fn reserved_characters_are_encoded_in_filter_values() {
        assert_eq!(filter_value("A#B"), "A%23B");
        assert_eq!(filter_value("A&limit=0"), "A%26limit%3D0");
        assert_eq!(filter_value("50%"), "50%25");
    }

    #[test]
    fn plain_lookup_values_pass_through() {
        assert_eq!(filter_value("12345678901"), "12345678901");
        assert_eq!(filter_value("UPA01"), "UPA01");
    }

    #[test]
    fn encoded_unit_code_keeps_the_query_intact() {
        let query = format!(
            "unidades?select=id,codigo,nome&codigo=eq.{}&limit=1",
            filter_value("A#B")
        );
        assert!(!query.contains('#'));
        assert!(query.ends_with("codigo=eq.A%23B&limit=1"));
    }
}
