//! Standalone pages served next to the desktop: the accounts table and the profile card.

use leptos::*;
use platform_host::{AccountRow, ApiError};

const PROFILE_SKILLS: [&str; 5] = [
    "React / Next.js",
    "TypeScript",
    "Three.js",
    "Rust",
    "UI/UX Design",
];
const PROFILE_LINKS: [&str; 4] = ["Twitter", "GitHub", "Dribbble", "Email"];

/// Message shown for a failed load; server-provided text wins over transport wording.
fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn years_label(years: f64) -> String {
    format!("{years}년")
}

#[component]
pub fn AccountsPage() -> impl IntoView {
    let accounts = create_local_resource(
        || (),
        |_| async move { platform_host_web::desktop_api().list_accounts().await },
    );

    view! {
        <div class="accounts-page">
            <header class="accounts-header">
                <h1>"SKT 계정 관리"</h1>
            </header>

            <div class="accounts-caution" role="note">
                "고가 요금제 개통 후에 요금제 내릴때는 "
                <strong>"42,000"</strong>
                "원 이상의 요금제로 변경해야 함!"
            </div>

            {move || match accounts.get() {
                None => view! { <div class="accounts-loading" aria-busy="true">"Loading..."</div> }.into_view(),
                Some(Err(err)) => {
                    logging::warn!("failed to load accounts: {err}");
                    view! {
                        <div class="accounts-error" role="alert">
                            {format!("오류 발생: {}", error_message(&err))}
                        </div>
                    }
                    .into_view()
                }
                Some(Ok(rows)) => view! { <AccountsTable rows /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AccountsTable(rows: Vec<AccountRow>) -> impl IntoView {
    view! {
        <div class="accounts-table-wrapper">
            <table class="accounts-table">
                <thead>
                    <tr>
                        <th>"이름"</th>
                        <th>"최초가입일"</th>
                        <th>"계정"</th>
                        <th>"비밀번호"</th>
                        <th>"가입년수"</th>
                        <th>"최근개통일"</th>
                        <th>"약정종료일"</th>
                        <th>"비고"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr data-row-id=row.id>
                                    <td>{row.name}</td>
                                    <td>{row.enroll_date}</td>
                                    <td>{row.account}</td>
                                    <td><span class="accounts-password">{row.pw}</span></td>
                                    <td><span class="accounts-years">{years_label(row.years)}</span></td>
                                    <td>{row.last_activation_date}</td>
                                    <td>{row.contract_end_date}</td>
                                    <td>{row.memo}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="profile-page">
            <div class="profile-card">
                <div class="profile-avatar" aria-hidden="true">"A"</div>
                <h1 class="profile-name">"Alex \"Nova\" Chen"</h1>
                <h2 class="profile-role">"Digital Architect & UI Artisan"</h2>
                <p class="profile-bio">
                    "Building digital dreams at the intersection of logic and creativity. \
                     Obsessed with pixel-perfect interfaces and seamless user experiences. \
                     Currently exploring the frontiers of WebGL and generative art."
                </p>
                <div class="profile-skills">
                    {PROFILE_SKILLS
                        .into_iter()
                        .map(|skill| view! { <span class="profile-skill">{skill}</span> })
                        .collect_view()}
                </div>
                <div class="profile-links">
                    {PROFILE_LINKS
                        .into_iter()
                        .map(|label| view! { <a href="#" class="profile-link">{label}</a> })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn server_error_text_is_shown_verbatim() {
        let err = ApiError::Status {
            status: 500,
            message: "Failed to fetch data from Notion".to_string(),
        };
        assert_eq!(error_message(&err), "Failed to fetch data from Notion");
        assert_eq!(
            error_message(&ApiError::Transport("offline".to_string())),
            "request failed: offline"
        );
    }

    #[test]
    fn whole_years_render_without_decimals() {
        assert_eq!(years_label(4.0), "4년");
        assert_eq!(years_label(2.5), "2.5년");
    }
}
